//! Secondary OAuth 1.0a token exchange driven by the hybrid assertion.
//!
//! A successful assertion embeds an approved request token; this module
//! exchanges it at the provider's access-token endpoint. The hybrid handshake
//! never transmits a request-token secret, so the token half of the signing
//! key is empty. Every failure in here is contained by the strategy: the
//! caller observes null credentials, never an error, and the OpenID login
//! stands.

// crates.io
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use rand::distr::{Alphanumeric, SampleString};
use sha1::Sha1;
use sha2::Sha256;
use time::OffsetDateTime;
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	extension::OAuthResponse,
	http::{TokenExchangeRequest, TokenHttpClient},
	openid::SignedMessage,
	provider::{
		descriptor::ProviderDescriptor,
		signing::{SignatureMethod, SigningParameter, SigningPolicy},
	},
	secret::{ConsumerSecret, TokenSecret},
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const OAUTH_VERSION: &str = "1.0";
const NONCE_LEN: usize = 32;
const RESPONSE_TOKEN_KEY: &str = "oauth_token";
const RESPONSE_SECRET_KEY: &str = "oauth_token_secret";

/// Stored credential pair produced by the hand-off.
///
/// On any hand-off failure both fields are explicitly null rather than
/// partially populated, so callers can distinguish "logged in, no OAuth
/// credentials" from "login failed".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OAuthCredentials {
	/// Issued access token.
	pub access_token: Option<String>,
	/// Secret paired with the access token.
	pub access_secret: Option<TokenSecret>,
}
impl OAuthCredentials {
	/// Returns true when the exchange produced a usable pair.
	pub const fn is_present(&self) -> bool {
		self.access_token.is_some() && self.access_secret.is_some()
	}
}
impl From<AccessToken> for OAuthCredentials {
	fn from(access: AccessToken) -> Self {
		Self { access_token: Some(access.token), access_secret: Some(access.secret) }
	}
}

/// Access token issued by the provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
	/// Token value.
	pub token: String,
	/// Token secret.
	pub secret: TokenSecret,
}

/// Consumer client bound to the provider site.
#[derive(Clone, Debug)]
pub struct OAuthConsumer {
	/// Consumer key identifying the relying party.
	pub key: String,
	/// Consumer secret signing every exchange.
	pub secret: ConsumerSecret,
	/// Provider site the exchange is rooted at.
	pub site: Url,
}
impl OAuthConsumer {
	/// Builds the consumer from descriptor credentials.
	pub fn from_descriptor(
		descriptor: &ProviderDescriptor,
		site: Url,
	) -> Result<Self, ConfigError> {
		match (&descriptor.consumer_key, &descriptor.consumer_secret) {
			(Some(key), Some(secret)) =>
				Ok(Self { key: key.clone(), secret: secret.clone(), site }),
			_ => Err(ConfigError::MissingConsumerKey),
		}
	}
}

/// Request token extracted from the hybrid assertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestToken {
	/// Token value approved alongside the assertion.
	pub token: String,
	/// Token secret; always empty in the hybrid handshake.
	pub secret: TokenSecret,
}
impl RequestToken {
	/// Wraps a hybrid request token with its (empty) secret.
	pub fn hybrid(token: impl Into<String>) -> Self {
		Self { token: token.into(), secret: TokenSecret::default() }
	}

	/// Extracts the embedded request token from a signed message.
	pub fn from_signed_message(message: &SignedMessage) -> Option<Self> {
		OAuthResponse::from_signed_message(message)
			.map(|response| Self::hybrid(response.request_token))
	}
}

/// Variable inputs to one signature computation.
///
/// Tests pin `timestamp`/`nonce` for determinism; production callers use
/// [`SigningParts::generated`]. The `body_hash`/`callback` slots exist so a
/// permissive assembler can populate them and the policy can prove they never
/// survive into the signature base.
#[derive(Clone, Debug)]
pub struct SigningParts {
	/// Unix timestamp stamped into `oauth_timestamp`.
	pub timestamp: i64,
	/// Random nonce stamped into `oauth_nonce`.
	pub nonce: String,
	/// `oauth_verifier`, when the flow carries one.
	pub verifier: Option<String>,
	/// `oauth_session_handle`, when present upstream.
	pub session_handle: Option<String>,
	/// `oauth_body_hash` candidate.
	pub body_hash: Option<String>,
	/// `oauth_callback` candidate.
	pub callback: Option<String>,
}
impl SigningParts {
	/// Creates parts with a fresh timestamp and nonce.
	pub fn generated() -> Self {
		Self {
			timestamp: OffsetDateTime::now_utc().unix_timestamp(),
			nonce: Alphanumeric.sample_string(&mut rand::rng(), NONCE_LEN),
			verifier: None,
			session_handle: None,
			body_hash: None,
			callback: None,
		}
	}

	/// Pins the timestamp.
	pub fn with_timestamp(mut self, timestamp: i64) -> Self {
		self.timestamp = timestamp;

		self
	}

	/// Pins the nonce.
	pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
		self.nonce = nonce.into();

		self
	}

	/// Sets the session handle forwarded from an earlier exchange.
	pub fn with_session_handle(mut self, handle: impl Into<String>) -> Self {
		self.session_handle = Some(handle.into());

		self
	}

	/// Sets the body-hash candidate a generic assembler would emit.
	pub fn with_body_hash(mut self, hash: impl Into<String>) -> Self {
		self.body_hash = Some(hash.into());

		self
	}

	/// Sets the callback candidate a generic assembler would emit.
	pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
		self.callback = Some(callback.into());

		self
	}
}

/// Fully signed access-token request ready for the transport.
#[derive(Clone, Debug)]
pub struct SignedTokenRequest {
	/// Access-token endpoint URL.
	pub url: Url,
	/// Parameters covered by the signature, post-policy.
	pub parameters: BTreeMap<String, String>,
	/// Computed `oauth_signature` value.
	pub signature: String,
	/// Rendered `Authorization: OAuth` header value.
	pub authorization: String,
}
impl SignedTokenRequest {
	/// Assembles candidate parameters, applies the policy, and signs.
	pub fn build(
		url: Url,
		consumer: &OAuthConsumer,
		token: &RequestToken,
		method: SignatureMethod,
		policy: &dyn SigningPolicy,
		parts: &SigningParts,
	) -> Result<Self, HandoffError> {
		let mut parameters = candidate_parameters(consumer, token, method, parts);

		policy.restrict(&mut parameters);

		let base = signature_base_string(&url, &parameters);
		let key = signing_key(&consumer.secret, &token.secret);
		let signature = compute_signature(method, &base, &key)?;
		let authorization = render_authorization(&parameters, &signature);

		Ok(Self { url, parameters, signature, authorization })
	}

	/// Converts into the transport-level request.
	pub fn into_exchange_request(self) -> TokenExchangeRequest {
		TokenExchangeRequest { url: self.url, authorization: self.authorization }
	}
}

/// Failures contained by the hand-off; these never escape `credentials()`.
#[derive(Debug, ThisError)]
pub enum HandoffError {
	/// OpenID response has not completed successfully.
	#[error("OpenID response has not completed successfully.")]
	Unauthenticated,
	/// Assertion does not embed an OAuth request token.
	#[error("Assertion does not embed an OAuth request token.")]
	MissingRequestToken,
	/// Consumer credentials or endpoint configuration are unusable.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// MAC construction failed.
	#[error("Signature computation failed.")]
	Signing,
	/// Endpoint answered outside the 2xx range.
	#[error("Access-token endpoint returned HTTP {status}.")]
	Endpoint {
		/// HTTP status code returned by the endpoint.
		status: u16,
	},
	/// Endpoint answered 2xx without a usable token pair.
	#[error("Access-token response is missing the token pair.")]
	MalformedResponse,
	/// Transport-level failure while calling the endpoint.
	#[error("Network error occurred while calling the access-token endpoint.")]
	Transport {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}

/// Exchanges the embedded request token for an access token.
pub async fn fetch_access_token<C>(
	http: &C,
	descriptor: &ProviderDescriptor,
	policy: &dyn SigningPolicy,
	site: &Url,
	request_token: &RequestToken,
) -> Result<AccessToken, HandoffError>
where
	C: ?Sized + TokenHttpClient,
{
	let consumer = OAuthConsumer::from_descriptor(descriptor, site.clone())?;
	let url = descriptor.access_token_url(site)?;
	let signed = SignedTokenRequest::build(
		url,
		&consumer,
		request_token,
		descriptor.signature_method,
		policy,
		&SigningParts::generated(),
	)?;
	let response = http
		.execute(signed.into_exchange_request())
		.await
		.map_err(|source| HandoffError::Transport { source: Box::new(source) })?;

	if !response.is_success() {
		return Err(HandoffError::Endpoint { status: response.status });
	}

	parse_access_token(&response.body)
}

fn candidate_parameters(
	consumer: &OAuthConsumer,
	token: &RequestToken,
	method: SignatureMethod,
	parts: &SigningParts,
) -> BTreeMap<String, String> {
	let mut params = BTreeMap::new();
	let mut push = |param: SigningParameter, value: Option<String>| {
		if let Some(value) = value {
			params.insert(param.as_str().to_owned(), value);
		}
	};

	push(SigningParameter::Verifier, parts.verifier.clone());
	push(SigningParameter::ConsumerKey, Some(consumer.key.clone()));
	push(SigningParameter::Token, Some(token.token.clone()));
	push(SigningParameter::SignatureMethod, Some(method.as_str().to_owned()));
	push(SigningParameter::Timestamp, Some(parts.timestamp.to_string()));
	push(SigningParameter::Nonce, Some(parts.nonce.clone()));
	push(SigningParameter::Version, Some(OAUTH_VERSION.to_owned()));
	push(SigningParameter::SessionHandle, parts.session_handle.clone());
	push(SigningParameter::BodyHash, parts.body_hash.clone());
	push(SigningParameter::Callback, parts.callback.clone());

	params
}

fn signature_base_string(url: &Url, params: &BTreeMap<String, String>) -> String {
	let mut base_url = url.clone();

	base_url.set_query(None);
	base_url.set_fragment(None);

	let normalized = params
		.iter()
		.map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
		.collect::<Vec<_>>()
		.join("&");

	format!(
		"POST&{}&{}",
		urlencoding::encode(base_url.as_str()),
		urlencoding::encode(&normalized),
	)
}

fn signing_key(consumer_secret: &ConsumerSecret, token_secret: &TokenSecret) -> String {
	format!(
		"{}&{}",
		urlencoding::encode(consumer_secret.expose()),
		urlencoding::encode(token_secret.expose()),
	)
}

fn compute_signature(
	method: SignatureMethod,
	base: &str,
	key: &str,
) -> Result<String, HandoffError> {
	match method {
		SignatureMethod::HmacSha1 => {
			let mut mac =
				Hmac::<Sha1>::new_from_slice(key.as_bytes()).map_err(|_| HandoffError::Signing)?;

			mac.update(base.as_bytes());

			Ok(STANDARD.encode(mac.finalize().into_bytes()))
		},
		SignatureMethod::HmacSha256 => {
			let mut mac =
				Hmac::<Sha256>::new_from_slice(key.as_bytes()).map_err(|_| HandoffError::Signing)?;

			mac.update(base.as_bytes());

			Ok(STANDARD.encode(mac.finalize().into_bytes()))
		},
		SignatureMethod::Plaintext => Ok(key.to_owned()),
	}
}

fn render_authorization(params: &BTreeMap<String, String>, signature: &str) -> String {
	let mut parts = params
		.iter()
		.map(|(key, value)| format!("{key}=\"{}\"", urlencoding::encode(value)))
		.collect::<Vec<_>>();

	parts.push(format!("oauth_signature=\"{}\"", urlencoding::encode(signature)));

	format!("OAuth {}", parts.join(", "))
}

fn parse_access_token(body: &str) -> Result<AccessToken, HandoffError> {
	let mut token = None;
	let mut secret = None;

	for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
		match key.as_ref() {
			RESPONSE_TOKEN_KEY => token = Some(value.into_owned()),
			RESPONSE_SECRET_KEY => secret = Some(value.into_owned()),
			_ => {},
		}
	}

	match (token, secret) {
		(Some(token), Some(secret)) if !token.is_empty() =>
			Ok(AccessToken { token, secret: TokenSecret::new(secret) }),
		_ => Err(HandoffError::MalformedResponse),
	}
}
