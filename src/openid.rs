//! Contract boundary with the external OpenID engine.
//!
//! Association, nonce tracking, and signature verification live behind
//! [`OpenIdEngine`]; this crate only assembles outgoing requests and consumes
//! the classified, already-verified responses the engine hands back. The trait
//! uses boxed futures so implementations stay free to pick their own runtime
//! and transport.

// self
use crate::{_prelude::*, request::AuthenticationRequest};

/// Boxed future returned by [`OpenIdEngine`] hooks.
pub type EngineFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a + Send>>;

/// Classification assigned by the engine after a completed round trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResponseStatus {
	/// Assertion verified and positive.
	Success,
	/// Assertion verified but negative, or verification failed.
	Failure,
	/// Provider did not answer within the engine's budget.
	Timeout,
	/// No OpenID response parameters were present at all.
	Missing,
}
impl ResponseStatus {
	/// Returns a stable label for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ResponseStatus::Success => "success",
			ResponseStatus::Failure => "failure",
			ResponseStatus::Timeout => "timeout",
			ResponseStatus::Missing => "missing",
		}
	}
}
impl Display for ResponseStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Signed namespace arguments carried by a successful assertion.
///
/// Keys are extension namespace URIs; values are the argument maps the
/// extensions encoded, stripped of their `openid.<alias>.` wire prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignedMessage {
	namespaces: BTreeMap<String, BTreeMap<String, String>>,
}
impl SignedMessage {
	/// Creates an empty message.
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the arguments stored under a namespace URI.
	pub fn insert_args(
		&mut self,
		ns_uri: impl Into<String>,
		args: impl IntoIterator<Item = (String, String)>,
	) {
		self.namespaces.insert(ns_uri.into(), args.into_iter().collect());
	}

	/// Builder-style variant of [`SignedMessage::insert_args`].
	pub fn with_args(
		mut self,
		ns_uri: impl Into<String>,
		args: impl IntoIterator<Item = (String, String)>,
	) -> Self {
		self.insert_args(ns_uri, args);

		self
	}

	/// Returns the arguments signed under a namespace URI, if any.
	pub fn namespace_args(&self, ns_uri: &str) -> Option<&BTreeMap<String, String>> {
		self.namespaces.get(ns_uri).filter(|args| !args.is_empty())
	}

	/// Returns a single argument signed under a namespace URI.
	pub fn get_single(&self, ns_uri: &str, key: &str) -> Option<&str> {
		self.namespace_args(ns_uri)?.get(key).map(String::as_str)
	}

	/// Resolves an Attribute Exchange value by its type URI.
	///
	/// Fetch responses declare `type.<alias> = <uri>` and carry the data in
	/// `value.<alias>` (or `value.<alias>.1` when a count is present).
	pub fn ax_value(&self, ns_uri: &str, type_uri: &str) -> Option<&str> {
		let args = self.namespace_args(ns_uri)?;
		let alias = args.iter().find_map(|(key, value)| {
			key.strip_prefix("type.").filter(|_| value == type_uri)
		})?;

		args.get(&format!("value.{alias}"))
			.or_else(|| args.get(&format!("value.{alias}.1")))
			.map(String::as_str)
	}
}

/// Completed OpenID round trip as reported by the engine.
///
/// Created by the engine after verification; read-only to this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenIdResponse {
	status: ResponseStatus,
	claimed_id: Option<String>,
	message: Option<SignedMessage>,
}
impl OpenIdResponse {
	/// Creates a successful response carrying the signed message.
	pub fn success(claimed_id: impl Into<String>, message: SignedMessage) -> Self {
		Self { status: ResponseStatus::Success, claimed_id: Some(claimed_id.into()), message: Some(message) }
	}

	/// Creates a non-success response with the provided classification.
	///
	/// A [`ResponseStatus::Success`] classification is downgraded to carry no
	/// signed message; use [`OpenIdResponse::success`] for verified assertions.
	pub fn unverified(status: ResponseStatus) -> Self {
		Self { status, claimed_id: None, message: None }
	}

	/// Returns the engine's classification.
	pub const fn status(&self) -> ResponseStatus {
		self.status
	}

	/// Returns true when the assertion verified positively.
	pub fn is_success(&self) -> bool {
		self.status == ResponseStatus::Success && self.message.is_some()
	}

	/// Returns the claimed identifier asserted by the provider.
	pub fn claimed_id(&self) -> Option<&str> {
		self.claimed_id.as_deref()
	}

	/// Returns the signed message for successful assertions.
	pub fn signed_message(&self) -> Option<&SignedMessage> {
		if self.status == ResponseStatus::Success { self.message.as_ref() } else { None }
	}
}

/// Outcome of dispatching an authentication request through the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
	/// Provider wants the user agent redirected to this URL.
	Redirect(Url),
	/// Provider answered in-band (immediate mode).
	Response(OpenIdResponse),
}

/// Failures raised by the engine while beginning or sending a request.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum EngineError {
	/// Discovery or association failed at the protocol level.
	#[error("OpenID protocol failure: {message}.")]
	Protocol {
		/// Engine-supplied failure summary.
		message: String,
	},
	/// Provider did not answer within the engine's budget.
	#[error("Timed out waiting for the identity provider.")]
	Timeout,
}

/// External OpenID engine contract.
///
/// Implementations own discovery, association, message signing, and
/// verification. Both hooks are blocking network round trips from the
/// caller's point of view; any timeout budget is the engine's to enforce.
pub trait OpenIdEngine
where
	Self: 'static + Send + Sync,
{
	/// Dispatches the outgoing authentication request.
	///
	/// Errors cover discovery/association failures and timeouts; both are
	/// classified as `connection_failed` by the strategy.
	fn send<'a>(
		&'a self,
		request: &'a AuthenticationRequest,
	) -> EngineFuture<'a, Result<Dispatch, EngineError>>;

	/// Verifies the callback parameters and classifies the round trip.
	fn complete<'a>(
		&'a self,
		params: &'a BTreeMap<String, String>,
		return_to: &'a Url,
	) -> EngineFuture<'a, OpenIdResponse>;
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::extension::AX_NS_URI;

	#[test]
	fn ax_values_resolve_through_type_declarations() {
		let message = SignedMessage::new().with_args(
			AX_NS_URI,
			[
				("type.ext0".to_owned(), "http://axschema.org/contact/email".to_owned()),
				("value.ext0".to_owned(), "user@example.com".to_owned()),
				("type.ext1".to_owned(), "http://axschema.org/namePerson/first".to_owned()),
				("count.ext1".to_owned(), "1".to_owned()),
				("value.ext1.1".to_owned(), "Ada".to_owned()),
			],
		);

		assert_eq!(
			message.ax_value(AX_NS_URI, "http://axschema.org/contact/email"),
			Some("user@example.com"),
		);
		assert_eq!(
			message.ax_value(AX_NS_URI, "http://axschema.org/namePerson/first"),
			Some("Ada"),
		);
		assert_eq!(message.ax_value(AX_NS_URI, "http://axschema.org/namePerson/last"), None);
	}

	#[test]
	fn non_success_responses_expose_no_signed_message() {
		let response = OpenIdResponse::unverified(ResponseStatus::Failure);

		assert!(!response.is_success());
		assert_eq!(response.signed_message(), None);

		let response = OpenIdResponse::success("https://accounts.example.com/u/1", SignedMessage::new());

		assert!(response.is_success());
		assert!(response.signed_message().is_some());
	}
}
