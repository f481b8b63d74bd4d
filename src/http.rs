//! Transport primitives for the OAuth access-token exchange.
//!
//! The module exposes [`TokenHttpClient`], the hand-off's only dependency on
//! an HTTP stack. Callers provide an implementation (typically behind
//! `Arc<T>` where `T: TokenHttpClient`) and the hand-off submits one signed
//! POST per exchange; the trait returns the raw status and body so error
//! containment stays inside the hand-off itself.

// std
use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::AUTHORIZATION;
// self
use crate::_prelude::*;

/// Boxed future returned by [`TokenHttpClient::execute`].
pub type HttpFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a + Send>>;

/// One signed POST to the provider's access-token endpoint.
#[derive(Clone, Debug)]
pub struct TokenExchangeRequest {
	/// Absolute access-token endpoint URL.
	pub url: Url,
	/// Rendered `Authorization: OAuth` header value.
	pub authorization: String,
}

/// Raw response surfaced back to the hand-off.
#[derive(Clone, Debug)]
pub struct TokenExchangeResponse {
	/// HTTP status code returned by the endpoint.
	pub status: u16,
	/// Response body, expected to be form-encoded on success.
	pub body: String,
}
impl TokenExchangeResponse {
	/// Returns true for 2xx statuses.
	pub const fn is_success(&self) -> bool {
		self.status >= 200 && self.status < 300
	}
}

/// Abstraction over HTTP transports capable of executing the token exchange.
///
/// Implementations must be `Send + Sync + 'static` so they can be shared
/// across strategy instances, and the returned futures must be `Send` so
/// transactions stay free to hop executors. Token requests should not follow
/// redirects; the access-token endpoint answers directly.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Submits the signed POST and returns the raw response.
	fn execute<'a>(
		&'a self,
		request: TokenExchangeRequest,
	) -> HttpFuture<'a, Result<TokenExchangeResponse, Self::TransportError>>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute<'a>(
		&'a self,
		request: TokenExchangeRequest,
	) -> HttpFuture<'a, Result<TokenExchangeResponse, Self::TransportError>> {
		Box::pin(async move {
			let response = self
				.0
				.post(request.url)
				.header(AUTHORIZATION, request.authorization)
				.send()
				.await?;
			let status = response.status().as_u16();
			let body = response.text().await?;

			Ok(TokenExchangeResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_covers_the_2xx_range() {
		let response = TokenExchangeResponse { status: 200, body: String::new() };

		assert!(response.is_success());

		let response = TokenExchangeResponse { status: 401, body: String::new() };

		assert!(!response.is_success());
	}
}
