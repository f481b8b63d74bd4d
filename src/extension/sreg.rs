//! Simple Registration extension payload (SReg 1.1).

// self
use crate::_prelude::*;

/// Namespace URI of the Simple Registration extension.
pub const SREG_NS_URI: &str = "http://openid.net/extensions/sreg/1.1";

const REQUIRED_KEY: &str = "required";
const OPTIONAL_KEY: &str = "optional";

/// Simple Registration fields understood by the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SregField {
	/// `email` response field.
	Email,
	/// `fullname` response field.
	Fullname,
	/// `nickname` response field.
	Nickname,
	/// `postcode` response field.
	Postcode,
}
impl SregField {
	/// Returns the SReg 1.1 wire name for the field.
	pub const fn as_str(self) -> &'static str {
		match self {
			SregField::Email => "email",
			SregField::Fullname => "fullname",
			SregField::Nickname => "nickname",
			SregField::Postcode => "postcode",
		}
	}
}
impl Display for SregField {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Simple Registration request attached to every authentication request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SregRequest {
	/// Fields the provider must return.
	pub required: Vec<SregField>,
	/// Fields the provider may return.
	pub optional: Vec<SregField>,
}
impl SregRequest {
	/// Creates a request from required/optional field lists.
	pub fn new(
		required: impl IntoIterator<Item = SregField>,
		optional: impl IntoIterator<Item = SregField>,
	) -> Self {
		Self { required: required.into_iter().collect(), optional: optional.into_iter().collect() }
	}

	/// Encodes the request into namespace arguments; empty lists are omitted.
	pub fn encode(&self) -> BTreeMap<String, String> {
		let mut args = BTreeMap::new();

		if !self.required.is_empty() {
			args.insert(REQUIRED_KEY.into(), join_fields(&self.required));
		}
		if !self.optional.is_empty() {
			args.insert(OPTIONAL_KEY.into(), join_fields(&self.optional));
		}

		args
	}
}

fn join_fields(fields: &[SregField]) -> String {
	fields.iter().map(|field| field.as_str()).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn field_lists_encode_comma_joined() {
		let request = SregRequest::new(
			[SregField::Email, SregField::Fullname],
			[SregField::Nickname],
		);
		let args = request.encode();

		assert_eq!(args.get(REQUIRED_KEY).map(String::as_str), Some("email,fullname"));
		assert_eq!(args.get(OPTIONAL_KEY).map(String::as_str), Some("nickname"));
	}

	#[test]
	fn empty_request_encodes_to_no_arguments() {
		assert!(SregRequest::default().encode().is_empty());
	}
}
