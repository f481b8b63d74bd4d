//! Outgoing authentication request assembly.
//!
//! The builder resolves the identifier endpoint, computes the return/callback
//! URL, and attaches extensions through pure predicates over the caller's
//! parameters, keeping provider-specific branching out of the transport.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	extension::{Extension, OAuthRequest, RegisterRequest, UiHintRequest},
	provider::descriptor::ProviderDescriptor,
};

/// Relying-party path the provider redirects back to.
pub const CALLBACK_PATH: &str = "/auth/oxygen/callback";
/// Page the provider reloads inside the login iframe after completion.
pub const IFRAME_REFRESH_PAGE: &str = "/loginiframe_refresh.htm";

const OAUTH_CONSUMER_PARAM: &str = "oauth[consumer]";
const IDENTITY_PARAM: &str = "identity";
const IMMEDIATE_PARAM: &str = "immediate";
const REGISTER_PARAM: &str = "register";
const TRUST_ROOT_PARAM: &str = "trust_root";
const RETURN_TO_PARAM: &str = "return_to";
const METHOD_PARAM: &str = "method";
const APP_RETURN_URL_PARAM: &str = "app_return_url";

/// HTTP method the provider should use for the indirect response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DispatchMethod {
	/// Redirect-based response.
	Get,
	#[default]
	/// Form-post response; what the provider's login form expects.
	Post,
}
impl DispatchMethod {
	/// Returns the lowercase wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			DispatchMethod::Get => "get",
			DispatchMethod::Post => "post",
		}
	}

	/// Parses a caller-supplied method hint; anything but `get` means post.
	pub fn parse(value: &str) -> Self {
		if value.eq_ignore_ascii_case("get") { Self::Get } else { Self::Post }
	}
}
impl Display for DispatchMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Scheme/host view of the inbound HTTP request.
///
/// Everything the builder derives from the caller's side (callback URL,
/// iframe refresh URL, logout return URL) is rooted here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestContext {
	base: Url,
}
impl RequestContext {
	/// Creates a context rooted at the provided base URL.
	pub fn new(base: Url) -> Self {
		Self { base }
	}

	/// Creates a context from the inbound request's scheme and host.
	pub fn from_parts(scheme: &str, host_with_port: &str) -> Result<Self, ConfigError> {
		Url::parse(&format!("{scheme}://{host_with_port}"))
			.map(Self::new)
			.map_err(|source| ConfigError::InvalidDerivedUrl { target: "request base", source })
	}

	/// Returns the scheme://host root of the inbound request.
	pub fn base(&self) -> &Url {
		&self.base
	}

	/// Resolves a relying-party path against the request base.
	pub fn url_for(&self, path: &str) -> Result<Url, ConfigError> {
		self.base
			.join(path)
			.map_err(|source| ConfigError::InvalidDerivedUrl { target: "relying-party", source })
	}
}

/// Caller-supplied parameters driving one initiation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitiationParams {
	/// Explicit identifier endpoint, overriding tier resolution.
	pub identifier: Option<String>,
	/// Consumer key soliciting an OAuth request token.
	pub oauth_consumer: Option<String>,
	/// Immediate-mode flag; the provider must answer without interacting.
	pub immediate: bool,
	/// Sign-up intent flag.
	pub register: bool,
	/// Trust root advertised to the provider.
	pub trust_root: Option<Url>,
	/// Return-to override; defaults to the computed callback URL.
	pub return_to: Option<Url>,
	/// Indirect-response method hint.
	pub method: Option<DispatchMethod>,
	/// Application URL to restore after the round trip.
	pub app_return_url: Option<String>,
}
impl InitiationParams {
	/// Parses initiation parameters from inbound query pairs.
	///
	/// The identifier is read from the descriptor's configured parameter name
	/// with `identity` as a legacy fallback; malformed URLs in `trust_root`/
	/// `return_to` are treated as absent.
	pub fn from_query_pairs<I, K, V>(descriptor: &ProviderDescriptor, pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut params = Self::default();

		for (key, value) in pairs {
			let value = value.as_ref();

			match key.as_ref() {
				key if key == descriptor.identifier_param => {
					params.identifier = Some(value.to_owned());
				},
				IDENTITY_PARAM =>
					if params.identifier.is_none() {
						params.identifier = Some(value.to_owned());
					},
				OAUTH_CONSUMER_PARAM => params.oauth_consumer = Some(value.to_owned()),
				IMMEDIATE_PARAM => params.immediate = value == "true",
				REGISTER_PARAM => params.register = value == "true",
				TRUST_ROOT_PARAM => params.trust_root = Url::parse(value).ok(),
				RETURN_TO_PARAM => params.return_to = Url::parse(value).ok(),
				METHOD_PARAM => params.method = Some(DispatchMethod::parse(value)),
				APP_RETURN_URL_PARAM => params.app_return_url = Some(value.to_owned()),
				_ => {},
			}
		}

		params
	}

	/// Sets the explicit identifier endpoint.
	pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
		self.identifier = Some(identifier.into());

		self
	}

	/// Sets the consumer key soliciting a request token.
	pub fn with_oauth_consumer(mut self, consumer: impl Into<String>) -> Self {
		self.oauth_consumer = Some(consumer.into());

		self
	}

	/// Sets the sign-up intent flag.
	pub fn with_register(mut self, register: bool) -> Self {
		self.register = register;

		self
	}

	/// Sets the immediate-mode flag.
	pub fn with_immediate(mut self, immediate: bool) -> Self {
		self.immediate = immediate;

		self
	}

	/// Sets the application URL to restore after the round trip.
	pub fn with_app_return_url(mut self, url: impl Into<String>) -> Self {
		self.app_return_url = Some(url.into());

		self
	}
}

/// Assembled authentication request; immutable once sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticationRequest {
	/// Identifier endpoint the engine starts discovery at.
	pub endpoint: Url,
	/// URL the provider redirects back to.
	pub return_to: Url,
	/// Trust root advertised to the provider.
	pub trust_root: Url,
	/// Indirect-response method.
	pub method: DispatchMethod,
	/// Immediate-mode flag.
	pub immediate: bool,
	extensions: Vec<Extension>,
}
impl AuthenticationRequest {
	/// Returns the attached extensions in attachment order.
	pub fn extensions(&self) -> &[Extension] {
		&self.extensions
	}
}

/// Builds the authentication request for one initiation.
pub fn build_authentication_request(
	descriptor: &ProviderDescriptor,
	params: &InitiationParams,
	ctx: &RequestContext,
) -> Result<AuthenticationRequest, ConfigError> {
	let endpoint = descriptor.resolve_identifier(params.identifier.as_deref())?;
	let mut return_to = match &params.return_to {
		Some(url) => url.clone(),
		None => ctx.url_for(CALLBACK_PATH)?,
	};

	if let Some(app_return_url) = &params.app_return_url {
		return_to.query_pairs_mut().append_pair(APP_RETURN_URL_PARAM, app_return_url);
	}

	let trust_root = params.trust_root.clone().unwrap_or_else(|| ctx.base().clone());
	let extensions = plan_extensions(descriptor, params, ctx)?;

	Ok(AuthenticationRequest {
		endpoint,
		return_to,
		trust_root,
		method: params.method.unwrap_or_default(),
		immediate: params.immediate,
		extensions,
	})
}

/// Plans the ordered extension list for one initiation.
///
/// Attachment is decided by pure predicates over the inputs: the attribute
/// schema always contributes SReg + AX, a consumer key (parameter first,
/// descriptor fallback) contributes the hybrid request, the UI hint is always
/// attached, and the register intent follows the query flag. A variant that
/// encodes to an empty argument map is never attached.
pub fn plan_extensions(
	descriptor: &ProviderDescriptor,
	params: &InitiationParams,
	ctx: &RequestContext,
) -> Result<Vec<Extension>, ConfigError> {
	let mut planned = Vec::new();

	attach(&mut planned, Extension::SimpleRegistration(descriptor.schema.sreg_request()));
	attach(&mut planned, Extension::AttributeExchange(descriptor.schema.ax_request()));

	if let Some(consumer) = params
		.oauth_consumer
		.as_deref()
		.or(descriptor.consumer_key.as_deref())
		.filter(|key| !key.is_empty())
	{
		attach(&mut planned, Extension::OAuthHybrid(OAuthRequest::new(consumer)));
	}

	let refresh_url = ctx.url_for(IFRAME_REFRESH_PAGE)?;

	attach(&mut planned, Extension::UiHint(UiHintRequest::iframe(refresh_url.as_str())));

	if params.register {
		attach(&mut planned, Extension::RegisterIntent(RegisterRequest::default()));
	}

	Ok(planned)
}

fn attach(planned: &mut Vec<Extension>, extension: Extension) {
	if !extension.encode().is_empty() {
		planned.push(extension);
	}
}
