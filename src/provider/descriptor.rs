//! Provider descriptor data structures and helpers shared by all phases.
//!
//! The module exposes validated configuration, a builder, and the attribute
//! schema so callers can describe the identity provider without touching the
//! transport layer.

/// Builder API for assembling provider descriptors.
pub mod builder;
/// Attribute field lists wired into provider descriptors.
pub mod schema;
/// Deployment tiers and their fixed identifier endpoints.
pub mod tier;

pub use builder::*;
pub use schema::*;
pub use tier::*;

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	provider::signing::SignatureMethod,
	secret::ConsumerSecret,
};

/// Default query parameter carrying a caller-supplied identifier endpoint.
pub const DEFAULT_IDENTIFIER_PARAM: &str = "openid_url";
/// Default provider path exchanging request tokens for access tokens.
pub const DEFAULT_ACCESS_TOKEN_PATH: &str = "/OAuth/AccessToken";
/// Default relying-party path the provider returns to after logout.
pub const DEFAULT_LOGOUT_RETURN_PATH: &str = "/auth/oxygen";

const LOGOUT_ENDPOINT_PATH: &str = "/Authentication/LogOut";
const LOGOUT_RETURN_PARAM: &str = "ReturnToUrl";

/// Immutable provider descriptor consumed by every phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Deployment tier selecting the default identifier endpoint.
	pub tier: EnvironmentTier,
	/// Fixed identifier endpoint override, bypassing tier resolution.
	pub identifier: Option<Url>,
	/// Query parameter name callers use to supply an identifier.
	pub identifier_param: String,
	/// OAuth consumer key for the hybrid hand-off.
	pub consumer_key: Option<String>,
	/// OAuth consumer secret paired with the key.
	pub consumer_secret: Option<ConsumerSecret>,
	/// Provider path exchanging request tokens for access tokens.
	pub access_token_path: String,
	/// Relying-party path the provider returns to after logout.
	pub logout_return_path: String,
	/// Signature method applied during the hand-off.
	pub signature_method: SignatureMethod,
	/// Attribute field lists requested on every initiation.
	pub schema: AttributeSchema,
}
impl ProviderDescriptor {
	/// Creates a new builder seeded with defaults.
	pub fn builder() -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new()
	}

	/// Resolves the identifier endpoint for a transaction.
	///
	/// An explicit, non-empty caller parameter wins verbatim; otherwise the
	/// descriptor override applies, and finally the tier's fixed endpoint.
	pub fn resolve_identifier(&self, explicit: Option<&str>) -> Result<Url, ConfigError> {
		if let Some(explicit) = explicit.filter(|value| !value.is_empty()) {
			return Url::parse(explicit).map_err(|source| ConfigError::InvalidEndpoint { source });
		}
		if let Some(identifier) = &self.identifier {
			return Ok(identifier.clone());
		}

		Url::parse(self.tier.identifier_endpoint())
			.map_err(|source| ConfigError::InvalidEndpoint { source })
	}

	/// Returns the access-token endpoint rooted at the provider site.
	pub fn access_token_url(&self, site: &Url) -> Result<Url, ConfigError> {
		site.join(&self.access_token_path)
			.map_err(|source| ConfigError::InvalidDerivedUrl { target: "access-token", source })
	}

	/// Returns the provider logout endpoint redirecting back to `return_to`.
	pub fn logout_url(&self, site: &Url, return_to: &Url) -> Result<Url, ConfigError> {
		let mut url = site
			.join(LOGOUT_ENDPOINT_PATH)
			.map_err(|source| ConfigError::InvalidDerivedUrl { target: "logout", source })?;

		url.query_pairs_mut().append_pair(LOGOUT_RETURN_PARAM, return_to.as_str());

		Ok(url)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn descriptor() -> ProviderDescriptor {
		ProviderDescriptor::builder().build().expect("Default descriptor should build.")
	}

	#[test]
	fn explicit_identifier_wins_verbatim() {
		let resolved = descriptor()
			.resolve_identifier(Some("https://accounts.example.test"))
			.expect("Explicit identifier should parse.");

		assert_eq!(resolved.as_str(), "https://accounts.example.test/");
	}

	#[test]
	fn empty_identifier_falls_back_to_the_tier() {
		let resolved =
			descriptor().resolve_identifier(Some("")).expect("Tier endpoint should parse.");

		assert_eq!(resolved.as_str(), "https://accounts-staging.autodesk.com/");
	}

	#[test]
	fn logout_url_carries_the_return_target() {
		let descriptor = descriptor();
		let site = descriptor.resolve_identifier(None).expect("Tier endpoint should parse.");
		let return_to = Url::parse("https://rp.example.com/auth/oxygen")
			.expect("Return URL fixture should parse.");
		let url = descriptor.logout_url(&site, &return_to).expect("Logout URL should derive.");

		assert_eq!(url.path(), "/Authentication/LogOut");
		assert!(
			url.query_pairs().any(|(key, value)| {
				key == "ReturnToUrl" && value == "https://rp.example.com/auth/oxygen"
			}),
			"ReturnToUrl should carry the relying-party logout return URL.",
		);
	}
}
