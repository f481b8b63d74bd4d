// self
use crate::{
	_prelude::*,
	error::ConfigError,
	provider::{
		descriptor::{
			AttributeSchema, EnvironmentTier, ProviderDescriptor, DEFAULT_ACCESS_TOKEN_PATH,
			DEFAULT_IDENTIFIER_PARAM, DEFAULT_LOGOUT_RETURN_PATH,
		},
		signing::SignatureMethod,
	},
	secret::ConsumerSecret,
};

/// Builder for [`ProviderDescriptor`] values.
#[derive(Clone, Debug, Default)]
pub struct ProviderDescriptorBuilder {
	/// Deployment tier selecting the default identifier endpoint.
	pub tier: EnvironmentTier,
	/// Fixed identifier endpoint override.
	pub identifier: Option<Url>,
	/// Query parameter name callers use to supply an identifier.
	pub identifier_param: Option<String>,
	/// OAuth consumer key for the hybrid hand-off.
	pub consumer_key: Option<String>,
	/// OAuth consumer secret paired with the key.
	pub consumer_secret: Option<ConsumerSecret>,
	/// Provider path exchanging request tokens for access tokens.
	pub access_token_path: Option<String>,
	/// Relying-party path the provider returns to after logout.
	pub logout_return_path: Option<String>,
	/// Signature method applied during the hand-off.
	pub signature_method: SignatureMethod,
	/// Attribute field lists requested on every initiation.
	pub schema: Option<AttributeSchema>,
}
impl ProviderDescriptorBuilder {
	/// Creates a builder seeded with defaults.
	pub fn new() -> Self {
		Self::default()
	}

	/// Selects the deployment tier.
	pub fn tier(mut self, tier: EnvironmentTier) -> Self {
		self.tier = tier;

		self
	}

	/// Pins a fixed identifier endpoint, bypassing tier resolution.
	pub fn identifier(mut self, identifier: Url) -> Self {
		self.identifier = Some(identifier);

		self
	}

	/// Overrides the identifier query parameter name.
	pub fn identifier_param(mut self, name: impl Into<String>) -> Self {
		self.identifier_param = Some(name.into());

		self
	}

	/// Sets the OAuth consumer key/secret pair.
	pub fn consumer(mut self, key: impl Into<String>, secret: impl Into<ConsumerSecret>) -> Self {
		self.consumer_key = Some(key.into());
		self.consumer_secret = Some(secret.into());

		self
	}

	/// Sets the consumer key without a secret; `build` rejects this unless a
	/// secret is supplied separately.
	pub fn consumer_key(mut self, key: impl Into<String>) -> Self {
		self.consumer_key = Some(key.into());

		self
	}

	/// Overrides the access-token path.
	pub fn access_token_path(mut self, path: impl Into<String>) -> Self {
		self.access_token_path = Some(path.into());

		self
	}

	/// Overrides the post-logout return path.
	pub fn logout_return_path(mut self, path: impl Into<String>) -> Self {
		self.logout_return_path = Some(path.into());

		self
	}

	/// Overrides the hand-off signature method.
	pub fn signature_method(mut self, method: SignatureMethod) -> Self {
		self.signature_method = method;

		self
	}

	/// Overrides the attribute schema.
	pub fn schema(mut self, schema: AttributeSchema) -> Self {
		self.schema = Some(schema);

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ConfigError> {
		let descriptor = ProviderDescriptor {
			tier: self.tier,
			identifier: self.identifier,
			identifier_param: self
				.identifier_param
				.unwrap_or_else(|| DEFAULT_IDENTIFIER_PARAM.to_owned()),
			consumer_key: self.consumer_key,
			consumer_secret: self.consumer_secret,
			access_token_path: self
				.access_token_path
				.unwrap_or_else(|| DEFAULT_ACCESS_TOKEN_PATH.to_owned()),
			logout_return_path: self
				.logout_return_path
				.unwrap_or_else(|| DEFAULT_LOGOUT_RETURN_PATH.to_owned()),
			signature_method: self.signature_method,
			schema: self.schema.unwrap_or_default(),
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.identifier_param.is_empty() {
			return Err(ConfigError::EmptyIdentifierParam);
		}
		if self.consumer_key.is_some() && self.consumer_secret.is_none() {
			return Err(ConfigError::MissingConsumerSecret);
		}

		validate_path("access_token_path", &self.access_token_path)?;
		validate_path("logout_return_path", &self.logout_return_path)?;

		Ok(())
	}
}

fn validate_path(option: &'static str, path: &str) -> Result<(), ConfigError> {
	if path.starts_with('/') {
		Ok(())
	} else {
		Err(ConfigError::RelativePath { option, path: path.to_owned() })
	}
}
