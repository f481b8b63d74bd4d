//! Transaction state machine orchestrating the three externally-visible phases.
//!
//! A [`Strategy`] is stateless across transactions; every inbound HTTP request
//! gets its own [`Transaction`], which owns the per-transaction caches
//! (resolved OpenID response, profile, OAuth credentials). Transactions are
//! thread-confined: they take `&mut self` and must not be shared across
//! concurrent requests. No retries exist at this layer; re-invoking
//! [`Transaction::initiate`] on a fresh transaction is the caller's job.

// self
use crate::{
	_prelude::*,
	handoff::{self, AccessToken, HandoffError, OAuthCredentials, RequestToken},
	http::TokenHttpClient,
	obs::{self, PhaseKind, PhaseOutcome, PhaseSpan},
	openid::{Dispatch, EngineError, OpenIdEngine, OpenIdResponse, ResponseStatus},
	profile::{ax_attributes, sreg_attributes, UserProfile},
	provider::{descriptor::ProviderDescriptor, signing::{HybridSigningPolicy, SigningPolicy}},
	request::{build_authentication_request, InitiationParams, RequestContext, CALLBACK_PATH},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Route initiating authentication.
pub const REQUEST_PATH: &str = "/auth/oxygen";
/// Fixed side-channel route issuing the provider logout redirect.
pub const LOGOUT_PATH: &str = "/auth/logout";

/// States traversed by one authentication transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransactionState {
	#[default]
	/// Nothing dispatched yet.
	Idle,
	/// Authentication request sent; awaiting the provider round trip.
	Requested,
	/// Assertion verified and positive.
	Success,
	/// Terminal failure (`connection_failed` or `invalid_credentials`).
	Failed,
	/// Provider timed out; terminal.
	TimedOut,
}
impl TransactionState {
	/// Returns a stable label for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TransactionState::Idle => "idle",
			TransactionState::Requested => "requested",
			TransactionState::Success => "success",
			TransactionState::Failed => "failed",
			TransactionState::TimedOut => "timed_out",
		}
	}
}
impl Display for TransactionState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Callback phase output handed back to the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallbackOutcome {
	/// Caller-visible unique identifier, when the profile carries one.
	pub uid: Option<String>,
	/// Merged user-info record.
	pub info: UserProfile,
	/// Extra metadata; always empty for this provider.
	pub extra: BTreeMap<String, String>,
}

/// Side-channel response produced by [`Transaction::handle_other`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HttpAction {
	/// Issue an HTTP redirect with the literal body below.
	Redirect {
		/// HTTP status code.
		status: u16,
		/// `Content-Type` header value.
		content_type: &'static str,
		/// Redirect target.
		location: Url,
		/// Literal response body.
		body: &'static str,
	},
	/// Pass the request through to the downstream application unmodified.
	PassThrough,
}

/// Coordinates hybrid authentication against a single provider descriptor.
///
/// The strategy owns the OpenID engine, the hand-off transport, and the
/// signing policy so transactions can focus on phase logic. Construction is
/// cheap; share one strategy and mint a [`Transaction`] per inbound request.
pub struct Strategy<E, C>
where
	E: OpenIdEngine,
	C: ?Sized + TokenHttpClient,
{
	/// Provider descriptor consumed by every phase.
	pub descriptor: ProviderDescriptor,
	/// External OpenID engine handling the assertion round trip.
	pub engine: Arc<E>,
	/// HTTP client wrapper used for the access-token exchange.
	pub http_client: Arc<C>,
	/// Policy restricting the hand-off signature parameter set.
	pub signing_policy: Arc<dyn SigningPolicy>,
}
impl<E, C> Strategy<E, C>
where
	E: OpenIdEngine,
	C: ?Sized + TokenHttpClient,
{
	/// Creates a strategy that reuses the caller-provided transport.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		engine: impl Into<Arc<E>>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			descriptor,
			engine: engine.into(),
			http_client: http_client.into(),
			signing_policy: Arc::new(HybridSigningPolicy),
		}
	}

	/// Replaces the signing-parameter policy.
	pub fn with_signing_policy(mut self, policy: Arc<dyn SigningPolicy>) -> Self {
		self.signing_policy = policy;

		self
	}

	/// Mints a fresh transaction for one inbound request.
	pub fn transaction(&self) -> Transaction<'_, E, C> {
		Transaction {
			strategy: self,
			state: TransactionState::Idle,
			response: None,
			identifier_hint: None,
			profile: None,
			credentials: None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl<E> Strategy<E, ReqwestHttpClient>
where
	E: OpenIdEngine,
{
	/// Creates a strategy backed by the crate's default reqwest transport.
	pub fn new(descriptor: ProviderDescriptor, engine: impl Into<Arc<E>>) -> Self {
		Self::with_http_client(descriptor, engine, ReqwestHttpClient::default())
	}
}
impl<E, C> Debug for Strategy<E, C>
where
	E: OpenIdEngine,
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Strategy").field("descriptor", &self.descriptor).finish()
	}
}

#[cfg(feature = "reqwest")]
/// Strategy specialized for the crate's default reqwest transport stack.
pub type ReqwestStrategy<E> = Strategy<E, ReqwestHttpClient>;

/// One authentication transaction.
///
/// Caches are transaction-local and computed at most once; the type is
/// deliberately `!Sync`-in-spirit — run each transaction on its own task and
/// drop it when the strategy returns control to the caller.
pub struct Transaction<'a, E, C>
where
	E: OpenIdEngine,
	C: ?Sized + TokenHttpClient,
{
	strategy: &'a Strategy<E, C>,
	state: TransactionState,
	response: Option<OpenIdResponse>,
	identifier_hint: Option<String>,
	profile: Option<UserProfile>,
	credentials: Option<OAuthCredentials>,
}
impl<E, C> Transaction<'_, E, C>
where
	E: OpenIdEngine,
	C: ?Sized + TokenHttpClient,
{
	/// Returns the current state-machine position.
	pub const fn state(&self) -> TransactionState {
		self.state
	}

	/// Returns the resolved OpenID response, once the callback ran.
	pub const fn response(&self) -> Option<&OpenIdResponse> {
		self.response.as_ref()
	}

	/// Request phase: build and dispatch the authentication request.
	///
	/// Engine-level protocol failures and timeouts classify as
	/// `connection_failed` and are terminal; any other outcome (redirect or
	/// in-band response) is forwarded unchanged.
	pub async fn initiate(
		&mut self,
		params: &InitiationParams,
		ctx: &RequestContext,
	) -> Result<Dispatch> {
		const KIND: PhaseKind = PhaseKind::Request;

		let span = PhaseSpan::new(KIND, "initiate");

		obs::record_phase_outcome(KIND, PhaseOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request =
					build_authentication_request(&self.strategy.descriptor, params, ctx)
						.map_err(Error::from)?;

				self.state = TransactionState::Requested;

				match self.strategy.engine.send(&request).await {
					Ok(dispatch) => Ok(dispatch),
					Err(error) => {
						self.state = match error {
							EngineError::Timeout => TransactionState::TimedOut,
							EngineError::Protocol { .. } => TransactionState::Failed,
						};

						Err(Error::connection_failed())
					},
				}
			})
			.await;

		match &result {
			Ok(_) => obs::record_phase_outcome(KIND, PhaseOutcome::Success),
			Err(_) => obs::record_phase_outcome(KIND, PhaseOutcome::Failure),
		}

		result
	}

	/// Callback phase: validate the round trip and assemble the profile.
	///
	/// Any status other than success fails with `invalid_credentials` without
	/// touching the profile assembler or the hand-off. Credentials stay lazy;
	/// call [`Transaction::credentials`] when they are needed.
	pub async fn callback(
		&mut self,
		params: &BTreeMap<String, String>,
		ctx: &RequestContext,
	) -> Result<CallbackOutcome> {
		const KIND: PhaseKind = PhaseKind::Callback;

		let span = PhaseSpan::new(KIND, "callback");

		obs::record_phase_outcome(KIND, PhaseOutcome::Attempt);

		let result = span
			.instrument(async move {
				let return_to = ctx.url_for(CALLBACK_PATH).map_err(Error::from)?;
				let response = match self.response.take() {
					Some(response) => response,
					None => self.strategy.engine.complete(params, &return_to).await,
				};
				let status = response.status();

				self.identifier_hint =
					params.get(&self.strategy.descriptor.identifier_param).cloned();

				let Some(message) = response.signed_message().cloned() else {
					self.response = Some(response);
					self.state = match status {
						ResponseStatus::Timeout => TransactionState::TimedOut,
						_ => TransactionState::Failed,
					};

					return Err(Error::invalid_credentials());
				};

				self.response = Some(response);
				self.state = TransactionState::Success;

				let profile = match &self.profile {
					Some(profile) => profile.clone(),
					None => {
						let profile = UserProfile::assemble(
							sreg_attributes(&message),
							ax_attributes(&message),
						);

						self.profile = Some(profile.clone());

						profile
					},
				};

				Ok(CallbackOutcome {
					uid: profile.uid().map(str::to_owned),
					info: profile,
					extra: BTreeMap::new(),
				})
			})
			.await;

		match &result {
			Ok(_) => obs::record_phase_outcome(KIND, PhaseOutcome::Success),
			Err(_) => obs::record_phase_outcome(KIND, PhaseOutcome::Failure),
		}

		result
	}

	/// Lazy OAuth hand-off, computed at most once per transaction.
	///
	/// A hand-off failure never raises past this method and never invalidates
	/// the OpenID login: the caller observes null credential fields instead.
	pub async fn credentials(&mut self) -> OAuthCredentials {
		const KIND: PhaseKind = PhaseKind::Handoff;

		if let Some(cached) = &self.credentials {
			return cached.clone();
		}

		let span = PhaseSpan::new(KIND, "credentials");

		obs::record_phase_outcome(KIND, PhaseOutcome::Attempt);

		let outcome = span.instrument(self.exchange()).await;
		let resolved = match outcome {
			Ok(access) => {
				obs::record_phase_outcome(KIND, PhaseOutcome::Success);

				OAuthCredentials::from(access)
			},
			Err(_) => {
				obs::record_phase_outcome(KIND, PhaseOutcome::Failure);

				OAuthCredentials::default()
			},
		};

		self.credentials = Some(resolved.clone());

		resolved
	}

	/// Side-channel path: logout redirect or downstream pass-through.
	///
	/// A request to the fixed logout path bypasses the OpenID/OAuth machinery
	/// entirely and answers with a 302 to the provider's logout endpoint.
	pub fn handle_other(&self, path: &str, ctx: &RequestContext) -> Result<HttpAction> {
		if path != LOGOUT_PATH {
			return Ok(HttpAction::PassThrough);
		}

		let descriptor = &self.strategy.descriptor;
		let site = descriptor.resolve_identifier(None)?;
		let return_to = ctx.url_for(&descriptor.logout_return_path)?;
		let location = descriptor.logout_url(&site, &return_to)?;

		Ok(HttpAction::Redirect {
			status: 302,
			content_type: "text",
			location,
			body: "302 found",
		})
	}

	async fn exchange(&self) -> Result<AccessToken, HandoffError> {
		let message = self
			.response
			.as_ref()
			.filter(|response| response.is_success())
			.and_then(OpenIdResponse::signed_message)
			.ok_or(HandoffError::Unauthenticated)?;
		let request_token = RequestToken::from_signed_message(message)
			.ok_or(HandoffError::MissingRequestToken)?;
		let descriptor = &self.strategy.descriptor;
		let site = descriptor.resolve_identifier(self.identifier_hint.as_deref())?;

		handoff::fetch_access_token(
			self.strategy.http_client.as_ref(),
			descriptor,
			self.strategy.signing_policy.as_ref(),
			&site,
			&request_token,
		)
		.await
	}
}
impl<E, C> Debug for Transaction<'_, E, C>
where
	E: OpenIdEngine,
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Transaction")
			.field("state", &self.state)
			.field("response_resolved", &self.response.is_some())
			.field("credentials_resolved", &self.credentials.is_some())
			.finish()
	}
}
