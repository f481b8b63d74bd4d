//! Relying-party toolkit for OpenID 2.0 + OAuth 1.0a hybrid sign-on—extension-rich
//! authentication requests, assertion handling, and embedded token exchange in one
//! crate built for production.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod error;
pub mod extension;
pub mod handoff;
pub mod http;
pub mod obs;
pub mod openid;
pub mod profile;
pub mod provider;
pub mod request;
pub mod secret;
pub mod strategy;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience fakes and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::sync::Mutex as StdMutex;
	// self
	use crate::{
		extension::{AxAttribute, AX_NS_URI, OAUTH_NS_URI, SREG_NS_URI},
		openid::{
			Dispatch, EngineError, EngineFuture, OpenIdEngine, OpenIdResponse, ResponseStatus,
			SignedMessage,
		},
		provider::descriptor::ProviderDescriptor,
		request::{AuthenticationRequest, RequestContext},
	};
	#[cfg(feature = "reqwest")]
	use crate::{http::ReqwestHttpClient, strategy::Strategy};

	/// Strategy type alias used by reqwest-backed integration tests.
	#[cfg(feature = "reqwest")]
	pub type ReqwestTestStrategy = Strategy<ScriptedEngine, ReqwestHttpClient>;

	enum Script {
		Reflect,
		Fixed(Result<Dispatch, EngineError>),
	}

	/// Scripted OpenID engine returning canned outcomes and recording the last
	/// authentication request it dispatched.
	pub struct ScriptedEngine {
		script: Script,
		response: OpenIdResponse,
		sent: StdMutex<Option<AuthenticationRequest>>,
	}
	impl ScriptedEngine {
		/// Engine whose dispatch redirects to the request's own endpoint.
		pub fn reflecting() -> Self {
			Self {
				script: Script::Reflect,
				response: OpenIdResponse::unverified(ResponseStatus::Missing),
				sent: StdMutex::new(None),
			}
		}

		/// Engine completing every round trip with the provided response.
		pub fn with_response(response: OpenIdResponse) -> Self {
			Self {
				script: Script::Fixed(Ok(Dispatch::Response(response.clone()))),
				response,
				sent: StdMutex::new(None),
			}
		}

		/// Engine failing every dispatch with the provided error.
		pub fn failing(error: EngineError) -> Self {
			let status = match &error {
				EngineError::Timeout => ResponseStatus::Timeout,
				EngineError::Protocol { .. } => ResponseStatus::Missing,
			};

			Self {
				script: Script::Fixed(Err(error)),
				response: OpenIdResponse::unverified(status),
				sent: StdMutex::new(None),
			}
		}

		/// Returns the last request passed to [`OpenIdEngine::send`].
		pub fn last_request(&self) -> Option<AuthenticationRequest> {
			self.sent.lock().expect("Scripted engine mutex should not be poisoned.").clone()
		}
	}
	impl OpenIdEngine for ScriptedEngine {
		fn send<'a>(
			&'a self,
			request: &'a AuthenticationRequest,
		) -> EngineFuture<'a, Result<Dispatch, EngineError>> {
			*self.sent.lock().expect("Scripted engine mutex should not be poisoned.") =
				Some(request.clone());

			let outcome = match &self.script {
				Script::Reflect => Ok(Dispatch::Redirect(request.endpoint.clone())),
				Script::Fixed(outcome) => outcome.clone(),
			};

			Box::pin(async move { outcome })
		}

		fn complete<'a>(
			&'a self,
			_params: &'a BTreeMap<String, String>,
			_return_to: &'a Url,
		) -> EngineFuture<'a, OpenIdResponse> {
			let response = self.response.clone();

			Box::pin(async move { response })
		}
	}

	/// Builds a staging descriptor carrying test consumer credentials.
	pub fn staging_descriptor() -> ProviderDescriptor {
		ProviderDescriptor::builder()
			.consumer("consumer-key", "consumer-secret")
			.build()
			.expect("Test descriptor should build successfully.")
	}

	/// Request context for the canonical relying-party host used in tests.
	pub fn test_request_context() -> RequestContext {
		RequestContext::from_parts("https", "rp.example.com")
			.expect("Test request context should build successfully.")
	}

	/// Signed message carrying SReg + AX data and, optionally, the hybrid
	/// namespace with an embedded request token.
	pub fn hybrid_signed_message(request_token: Option<&str>) -> SignedMessage {
		let mut message = SignedMessage::new()
			.with_args(
				SREG_NS_URI,
				[
					("email".to_owned(), "sreg@example.com".to_owned()),
					("fullname".to_owned(), "A. Lovelace".to_owned()),
					("nickname".to_owned(), "ada".to_owned()),
				],
			)
			.with_args(
				AX_NS_URI,
				[
					("type.email".to_owned(), AxAttribute::Email.uri().to_owned()),
					("value.email".to_owned(), "ada@example.com".to_owned()),
					("type.first".to_owned(), AxAttribute::FirstName.uri().to_owned()),
					("value.first".to_owned(), "Ada".to_owned()),
					("type.last".to_owned(), AxAttribute::LastName.uri().to_owned()),
					("value.last".to_owned(), "Lovelace".to_owned()),
					("type.uid".to_owned(), AxAttribute::Uid.uri().to_owned()),
					("value.uid".to_owned(), "u-100".to_owned()),
				],
			);

		if let Some(token) = request_token {
			message.insert_args(OAUTH_NS_URI, [("request_token".to_owned(), token.to_owned())]);
		}

		message
	}

	/// Successful response wrapping [`hybrid_signed_message`].
	pub fn hybrid_success_response(request_token: Option<&str>) -> OpenIdResponse {
		OpenIdResponse::success(
			"https://accounts-staging.autodesk.com/u/100",
			hybrid_signed_message(request_token),
		)
	}

	/// Constructs a [`Strategy`] backed by the scripted engine and the default
	/// reqwest transport used across integration tests.
	#[cfg(feature = "reqwest")]
	pub fn build_test_strategy(
		descriptor: ProviderDescriptor,
		engine: ScriptedEngine,
	) -> ReqwestTestStrategy {
		Strategy::with_http_client(descriptor, engine, ReqwestHttpClient::default())
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, tokio as _};
