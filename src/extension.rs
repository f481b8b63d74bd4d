//! OpenID extension payloads and their namespace-argument codecs.
//!
//! Each variant owns a namespace URI/alias pair and encodes to a plain
//! argument map; the engine is responsible for prefixing the arguments with
//! `openid.<alias>.` on the wire. A variant that encodes to an empty map is
//! never attached to a request.

pub mod ax;
pub mod oauth;
pub mod register;
pub mod sreg;
pub mod ui;

pub use ax::*;
pub use oauth::*;
pub use register::*;
pub use sreg::*;
pub use ui::*;

// self
use crate::_prelude::*;

/// Namespace URI/alias pair owned by every extension variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Namespace {
	/// Extension namespace URI carried in the `openid.ns.<alias>` argument.
	pub uri: &'static str,
	/// Short alias used to prefix the extension's wire arguments.
	pub alias: &'static str,
}

/// Extension kinds, used to inspect what a request carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
	/// Simple Registration request fields.
	SimpleRegistration,
	/// Attribute Exchange fetch request.
	AttributeExchange,
	/// OpenID/OAuth hybrid request-token solicitation.
	OAuthHybrid,
	/// User Interface hints (iframe variant).
	UiHint,
	/// Registration-intent marker.
	RegisterIntent,
}
impl ExtensionKind {
	/// Returns a stable label for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ExtensionKind::SimpleRegistration => "sreg",
			ExtensionKind::AttributeExchange => "ax",
			ExtensionKind::OAuthHybrid => "oauth",
			ExtensionKind::UiHint => "ui",
			ExtensionKind::RegisterIntent => "register",
		}
	}
}
impl Display for ExtensionKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Tagged extension attached to an authentication request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extension {
	/// Simple Registration request fields.
	SimpleRegistration(SregRequest),
	/// Attribute Exchange fetch request.
	AttributeExchange(AxRequest),
	/// OpenID/OAuth hybrid request-token solicitation.
	OAuthHybrid(OAuthRequest),
	/// User Interface hints (iframe variant).
	UiHint(UiHintRequest),
	/// Registration-intent marker.
	RegisterIntent(RegisterRequest),
}
impl Extension {
	/// Returns the kind tag for the variant.
	pub const fn kind(&self) -> ExtensionKind {
		match self {
			Extension::SimpleRegistration(_) => ExtensionKind::SimpleRegistration,
			Extension::AttributeExchange(_) => ExtensionKind::AttributeExchange,
			Extension::OAuthHybrid(_) => ExtensionKind::OAuthHybrid,
			Extension::UiHint(_) => ExtensionKind::UiHint,
			Extension::RegisterIntent(_) => ExtensionKind::RegisterIntent,
		}
	}

	/// Returns the namespace URI/alias pair for the variant.
	pub const fn namespace(&self) -> Namespace {
		match self {
			Extension::SimpleRegistration(_) => Namespace { uri: SREG_NS_URI, alias: "sreg" },
			Extension::AttributeExchange(_) => Namespace { uri: AX_NS_URI, alias: "ax" },
			Extension::OAuthHybrid(_) => Namespace { uri: OAUTH_NS_URI, alias: "oauth" },
			Extension::UiHint(_) => Namespace { uri: UI_NS_URI, alias: "ui" },
			Extension::RegisterIntent(_) => Namespace { uri: REGISTER_NS_URI, alias: "register" },
		}
	}

	/// Encodes the variant into its namespace arguments.
	pub fn encode(&self) -> BTreeMap<String, String> {
		match self {
			Extension::SimpleRegistration(inner) => inner.encode(),
			Extension::AttributeExchange(inner) => inner.encode(),
			Extension::OAuthHybrid(inner) => inner.encode(),
			Extension::UiHint(inner) => inner.encode(),
			Extension::RegisterIntent(inner) => inner.encode(),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn namespaces_pair_uri_with_alias() {
		let extension = Extension::RegisterIntent(RegisterRequest::default());
		let namespace = extension.namespace();

		assert_eq!(namespace.uri, REGISTER_NS_URI);
		assert_eq!(namespace.alias, "register");
		assert_eq!(extension.kind(), ExtensionKind::RegisterIntent);
	}
}
