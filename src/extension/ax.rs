//! Attribute Exchange extension payload (AX 1.0 fetch requests).

// self
use crate::_prelude::*;

/// Namespace URI of the Attribute Exchange extension.
pub const AX_NS_URI: &str = "http://openid.net/srv/ax/1.0";

const MODE_KEY: &str = "mode";
const MODE_FETCH_REQUEST: &str = "fetch_request";
const REQUIRED_KEY: &str = "required";
const IF_AVAILABLE_KEY: &str = "if_available";

/// Attribute Exchange attributes in the provider's schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxAttribute {
	/// Contact email address.
	Email,
	/// Full display name.
	Name,
	/// First (given) name.
	FirstName,
	/// Last (family) name.
	LastName,
	/// Friendly nickname.
	Nickname,
	/// Provider-scoped stable user identifier.
	Uid,
	/// 20px avatar variant.
	Image20,
	/// 50px avatar variant.
	Image50,
}
impl AxAttribute {
	/// Returns the attribute type URI exchanged on the wire.
	pub const fn uri(self) -> &'static str {
		match self {
			AxAttribute::Email => "http://axschema.org/contact/email",
			AxAttribute::Name => "http://axschema.org/namePerson",
			AxAttribute::FirstName => "http://axschema.org/namePerson/first",
			AxAttribute::LastName => "http://axschema.org/namePerson/last",
			AxAttribute::Nickname => "http://axschema.org/namePerson/friendly",
			AxAttribute::Uid => "http://axschema.org/autodesk/userid",
			AxAttribute::Image20 => "http://axschema.org/autodesk/media/image/20",
			AxAttribute::Image50 => "http://axschema.org/autodesk/media/image/50",
		}
	}

	/// Returns the short alias used in `type.<alias>`/`value.<alias>` pairs.
	pub const fn alias(self) -> &'static str {
		match self {
			AxAttribute::Email => "email",
			AxAttribute::Name => "name",
			AxAttribute::FirstName => "first_name",
			AxAttribute::LastName => "last_name",
			AxAttribute::Nickname => "nickname",
			AxAttribute::Uid => "uid",
			AxAttribute::Image20 => "image20",
			AxAttribute::Image50 => "image50",
		}
	}
}
impl Display for AxAttribute {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.alias())
	}
}

/// Attribute Exchange fetch request attached to every authentication request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AxRequest {
	/// Attributes the provider must return.
	pub required: Vec<AxAttribute>,
	/// Attributes the provider may return.
	pub if_available: Vec<AxAttribute>,
}
impl AxRequest {
	/// Creates a fetch request from required/if-available attribute lists.
	pub fn new(
		required: impl IntoIterator<Item = AxAttribute>,
		if_available: impl IntoIterator<Item = AxAttribute>,
	) -> Self {
		Self {
			required: required.into_iter().collect(),
			if_available: if_available.into_iter().collect(),
		}
	}

	/// Encodes the fetch request into namespace arguments; an attribute-less
	/// request encodes to an empty map.
	pub fn encode(&self) -> BTreeMap<String, String> {
		if self.required.is_empty() && self.if_available.is_empty() {
			return BTreeMap::new();
		}

		let mut args = BTreeMap::new();

		args.insert(MODE_KEY.into(), MODE_FETCH_REQUEST.into());

		for attribute in self.required.iter().chain(&self.if_available) {
			args.insert(format!("type.{}", attribute.alias()), attribute.uri().to_owned());
		}
		if !self.required.is_empty() {
			args.insert(REQUIRED_KEY.into(), join_aliases(&self.required));
		}
		if !self.if_available.is_empty() {
			args.insert(IF_AVAILABLE_KEY.into(), join_aliases(&self.if_available));
		}

		args
	}
}

fn join_aliases(attributes: &[AxAttribute]) -> String {
	attributes.iter().map(|attribute| attribute.alias()).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn fetch_request_declares_types_and_alias_lists() {
		let request = AxRequest::new(
			[AxAttribute::Email, AxAttribute::Uid],
			[AxAttribute::Nickname],
		);
		let args = request.encode();

		assert_eq!(args.get(MODE_KEY).map(String::as_str), Some(MODE_FETCH_REQUEST));
		assert_eq!(
			args.get("type.email").map(String::as_str),
			Some("http://axschema.org/contact/email"),
		);
		assert_eq!(
			args.get("type.uid").map(String::as_str),
			Some("http://axschema.org/autodesk/userid"),
		);
		assert_eq!(args.get(REQUIRED_KEY).map(String::as_str), Some("email,uid"));
		assert_eq!(args.get(IF_AVAILABLE_KEY).map(String::as_str), Some("nickname"));
	}

	#[test]
	fn attribute_less_request_encodes_to_no_arguments() {
		assert!(AxRequest::default().encode().is_empty());
	}
}
