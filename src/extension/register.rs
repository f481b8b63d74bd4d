//! Registration-intent extension payload.
//!
//! A bare marker the provider uses to open its sign-up form instead of the
//! login form.

// self
use crate::_prelude::*;

/// Namespace URI of the registration-intent extension.
pub const REGISTER_NS_URI: &str = "http://autodesk.com/openid/ext/register/1.0";
/// Default registration mode.
pub const REGISTER_MODE: &str = "register";

const MODE_KEY: &str = "mode";

/// Registration-intent payload attached when the caller requested sign-up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterRequest {
	/// Registration mode; encodes as `register` when unset.
	pub mode: Option<String>,
}
impl RegisterRequest {
	/// Creates a request with an explicit mode.
	pub fn with_mode(mode: impl Into<String>) -> Self {
		Self { mode: Some(mode.into()) }
	}

	/// Encodes the intent into namespace arguments.
	pub fn encode(&self) -> BTreeMap<String, String> {
		let mode = self.mode.as_deref().unwrap_or(REGISTER_MODE);

		BTreeMap::from_iter([(MODE_KEY.to_owned(), mode.to_owned())])
	}

	/// Rebuilds the intent from namespace arguments.
	///
	/// Returns `None` when the provider supplied no arguments under the
	/// register namespace, meaning the extension was not requested.
	pub fn decode(args: &BTreeMap<String, String>) -> Option<Self> {
		if args.is_empty() {
			return None;
		}

		Some(Self { mode: args.get(MODE_KEY).cloned() })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn unset_mode_encodes_the_register_literal() {
		let args = RegisterRequest::default().encode();

		assert_eq!(args.get(MODE_KEY).map(String::as_str), Some(REGISTER_MODE));
	}

	#[test]
	fn round_trip_preserves_an_explicit_mode() {
		let request = RegisterRequest::with_mode("invite");
		let decoded = RegisterRequest::decode(&request.encode()).expect("Arguments should decode.");

		assert_eq!(decoded, request);
	}

	#[test]
	fn decode_of_empty_arguments_is_none() {
		assert_eq!(RegisterRequest::decode(&BTreeMap::new()), None);
	}
}
