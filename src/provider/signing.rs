//! Signing-parameter policy hooks for the OAuth hand-off.
//!
//! Implementations decide which OAuth parameters participate in the signature
//! base before the hand-off signs an access-token request. The hooks work on
//! plain `BTreeMap`s so policies stay decoupled from any HTTP client.

// self
use crate::_prelude::*;

/// OAuth protocol parameters a signer may emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SigningParameter {
	/// `oauth_verifier`.
	Verifier,
	/// `oauth_consumer_key`.
	ConsumerKey,
	/// `oauth_token`.
	Token,
	/// `oauth_signature_method`.
	SignatureMethod,
	/// `oauth_timestamp`.
	Timestamp,
	/// `oauth_nonce`.
	Nonce,
	/// `oauth_version`.
	Version,
	/// `oauth_session_handle`.
	SessionHandle,
	/// `oauth_body_hash`.
	BodyHash,
	/// `oauth_callback`.
	Callback,
}
impl SigningParameter {
	/// Returns the wire name of the parameter.
	pub const fn as_str(self) -> &'static str {
		match self {
			SigningParameter::Verifier => "oauth_verifier",
			SigningParameter::ConsumerKey => "oauth_consumer_key",
			SigningParameter::Token => "oauth_token",
			SigningParameter::SignatureMethod => "oauth_signature_method",
			SigningParameter::Timestamp => "oauth_timestamp",
			SigningParameter::Nonce => "oauth_nonce",
			SigningParameter::Version => "oauth_version",
			SigningParameter::SessionHandle => "oauth_session_handle",
			SigningParameter::BodyHash => "oauth_body_hash",
			SigningParameter::Callback => "oauth_callback",
		}
	}
}
impl Display for SigningParameter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Signature methods selectable on the descriptor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureMethod {
	#[default]
	/// HMAC-SHA1, the method the provider's token service expects.
	HmacSha1,
	/// HMAC-SHA256 for providers that accept it.
	HmacSha256,
	/// PLAINTEXT; the signing key doubles as the signature.
	Plaintext,
}
impl SignatureMethod {
	/// Returns the `oauth_signature_method` wire value.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignatureMethod::HmacSha1 => "HMAC-SHA1",
			SignatureMethod::HmacSha256 => "HMAC-SHA256",
			SignatureMethod::Plaintext => "PLAINTEXT",
		}
	}
}
impl Display for SignatureMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Policy hook restricting the signature parameter set.
///
/// The hand-off assembles every candidate parameter it knows about, then
/// hands the map to the policy before building the signature base. Policies
/// must never add parameters, only remove them.
pub trait SigningPolicy
where
	Self: Send + Sync,
{
	/// Removes parameters the provider rejects.
	fn restrict(&self, params: &mut BTreeMap<String, String>);
}

/// Policy matching the provider's token service.
///
/// The service rejects requests whose signature covers `oauth_body_hash` or
/// `oauth_callback`, so only the fixed subset below survives; each parameter
/// participates only when its value was populated upstream.
#[derive(Clone, Copy, Debug, Default)]
pub struct HybridSigningPolicy;
impl HybridSigningPolicy {
	const ALLOWED: [SigningParameter; 8] = [
		SigningParameter::Verifier,
		SigningParameter::ConsumerKey,
		SigningParameter::Token,
		SigningParameter::SignatureMethod,
		SigningParameter::Timestamp,
		SigningParameter::Nonce,
		SigningParameter::Version,
		SigningParameter::SessionHandle,
	];
}
impl Display for HybridSigningPolicy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("hybrid-signing-policy")
	}
}
impl SigningPolicy for HybridSigningPolicy {
	fn restrict(&self, params: &mut BTreeMap<String, String>) {
		params.retain(|key, _| Self::ALLOWED.iter().any(|allowed| allowed.as_str() == key));
	}
}
