// self
use crate::_prelude::*;

/// Deployment tiers of the identity provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentTier {
	/// Developer sandbox accounts service.
	Dev,
	/// Live accounts service.
	Production,
	#[default]
	/// Pre-production accounts service; the default when unset.
	Staging,
}
impl EnvironmentTier {
	/// Returns the fixed identifier endpoint for the tier.
	pub const fn identifier_endpoint(self) -> &'static str {
		match self {
			EnvironmentTier::Dev => "https://accounts-dev.autodesk.com",
			EnvironmentTier::Production => "https://accounts.autodesk.com",
			EnvironmentTier::Staging => "https://accounts-staging.autodesk.com",
		}
	}

	/// Returns a stable label for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			EnvironmentTier::Dev => "dev",
			EnvironmentTier::Production => "production",
			EnvironmentTier::Staging => "staging",
		}
	}
}
impl Display for EnvironmentTier {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn staging_is_the_default_tier() {
		assert_eq!(EnvironmentTier::default(), EnvironmentTier::Staging);
		assert_eq!(
			EnvironmentTier::default().identifier_endpoint(),
			"https://accounts-staging.autodesk.com",
		);
	}

	#[test]
	fn tiers_map_to_fixed_endpoints() {
		assert_eq!(
			EnvironmentTier::Dev.identifier_endpoint(),
			"https://accounts-dev.autodesk.com",
		);
		assert_eq!(
			EnvironmentTier::Production.identifier_endpoint(),
			"https://accounts.autodesk.com",
		);
	}
}
