//! OpenID/OAuth hybrid extension payloads.
//!
//! The request side solicits an OAuth request token alongside the identity
//! assertion; the response side carries the approved token back inside the
//! signed message, letting the relying party skip the authorization redirect.

// self
use crate::{_prelude::*, openid::SignedMessage};

/// Namespace URI of the OpenID/OAuth hybrid extension.
pub const OAUTH_NS_URI: &str = "http://specs.openid.net/extensions/oauth/1.0";

const CONSUMER_KEY: &str = "consumer";
const SCOPE_KEY: &str = "scope";
const REQUEST_TOKEN_KEY: &str = "request_token";

/// Hybrid request attached when a consumer key is configured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthRequest {
	/// OAuth consumer key identifying the relying party.
	pub consumer: String,
	/// Optional scope the requested token should cover.
	pub scope: Option<String>,
}
impl OAuthRequest {
	/// Creates a hybrid request for the provided consumer key.
	pub fn new(consumer: impl Into<String>) -> Self {
		Self { consumer: consumer.into(), scope: None }
	}

	/// Sets the requested token scope.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Encodes the request into namespace arguments.
	pub fn encode(&self) -> BTreeMap<String, String> {
		let mut args = BTreeMap::new();

		args.insert(CONSUMER_KEY.into(), self.consumer.clone());

		if let Some(scope) = &self.scope {
			args.insert(SCOPE_KEY.into(), scope.clone());
		}

		args
	}
}

/// Hybrid response extracted from a successful assertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthResponse {
	/// Approved request token to exchange at the access-token endpoint.
	pub request_token: String,
	/// Scope granted by the provider, when echoed back.
	pub scope: Option<String>,
}
impl OAuthResponse {
	/// Extracts the hybrid response from a signed message.
	///
	/// Returns `None` when the assertion does not carry the hybrid namespace
	/// or the embedded token is empty.
	pub fn from_signed_message(message: &SignedMessage) -> Option<Self> {
		let args = message.namespace_args(OAUTH_NS_URI)?;
		let request_token = args.get(REQUEST_TOKEN_KEY).filter(|token| !token.is_empty())?;

		Some(Self { request_token: request_token.clone(), scope: args.get(SCOPE_KEY).cloned() })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_encodes_consumer_and_optional_scope() {
		let args = OAuthRequest::new("consumer-key").encode();

		assert_eq!(args.get(CONSUMER_KEY).map(String::as_str), Some("consumer-key"));
		assert_eq!(args.get(SCOPE_KEY), None);

		let args = OAuthRequest::new("consumer-key").with_scope("documents").encode();

		assert_eq!(args.get(SCOPE_KEY).map(String::as_str), Some("documents"));
	}

	#[test]
	fn response_extraction_requires_a_non_empty_token() {
		let mut message = SignedMessage::new();

		assert_eq!(OAuthResponse::from_signed_message(&message), None);

		message.insert_args(OAUTH_NS_URI, [(REQUEST_TOKEN_KEY.to_owned(), String::new())]);

		assert_eq!(OAuthResponse::from_signed_message(&message), None);

		message.insert_args(OAUTH_NS_URI, [(REQUEST_TOKEN_KEY.to_owned(), "rt-123".to_owned())]);

		let response = OAuthResponse::from_signed_message(&message)
			.expect("Hybrid namespace with a token should decode.");

		assert_eq!(response.request_token, "rt-123");
		assert_eq!(response.scope, None);
	}
}
