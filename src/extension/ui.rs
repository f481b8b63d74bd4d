//! User Interface extension payload (iframe variant of UI 1.0 draft 0.5).

// self
use crate::_prelude::*;

/// Namespace URI of the User Interface extension.
pub const UI_NS_URI: &str = "http://specs.openid.net/extensions/ui/1.0";
/// Popup/iframe mode advertised by default.
pub const UI_MODE_IFRAME: &str = "iframe";

const LANG_KEY: &str = "lang";
const ICON_KEY: &str = "icon";
const MODE_KEY: &str = "mode";
const IFRAME_REFRESH_KEY: &str = "iframe_refresh_url";

/// UI-hint payload sent alongside the authentication request.
///
/// The provider renders its login form inside the relying party's iframe and
/// reloads `refresh_url` once the assertion completes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiHintRequest {
	/// Preferred BCP 47 language tag for the provider UI.
	pub lang: Option<String>,
	/// Relying-party icon URL the provider may display.
	pub icon: Option<String>,
	/// Requested presentation mode.
	pub mode: Option<String>,
	/// Page the provider reloads inside the iframe after completion.
	pub refresh_url: Option<String>,
}
impl UiHintRequest {
	/// Creates an iframe-mode hint pointing at the provided refresh page.
	pub fn iframe(refresh_url: impl Into<String>) -> Self {
		Self {
			lang: None,
			icon: None,
			mode: Some(UI_MODE_IFRAME.into()),
			refresh_url: Some(refresh_url.into()),
		}
	}

	/// Sets the preferred UI language.
	pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
		self.lang = Some(lang.into());

		self
	}

	/// Sets the relying-party icon URL.
	pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
		self.icon = Some(icon.into());

		self
	}

	/// Encodes the hint into namespace arguments; null fields are omitted.
	pub fn encode(&self) -> BTreeMap<String, String> {
		let mut args = BTreeMap::new();

		if let Some(lang) = &self.lang {
			args.insert(LANG_KEY.into(), lang.clone());
		}
		if let Some(icon) = &self.icon {
			args.insert(ICON_KEY.into(), icon.clone());
		}
		if let Some(mode) = &self.mode {
			args.insert(MODE_KEY.into(), mode.clone());
		}
		if let Some(refresh_url) = &self.refresh_url {
			args.insert(IFRAME_REFRESH_KEY.into(), refresh_url.clone());
		}

		args
	}

	/// Rebuilds the hint from namespace arguments.
	///
	/// Returns `None` when the provider supplied no arguments under the UI
	/// namespace, meaning the extension was not requested.
	pub fn decode(args: &BTreeMap<String, String>) -> Option<Self> {
		if args.is_empty() {
			return None;
		}

		Some(Self {
			lang: args.get(LANG_KEY).cloned(),
			icon: args.get(ICON_KEY).cloned(),
			mode: args.get(MODE_KEY).cloned(),
			refresh_url: args.get(IFRAME_REFRESH_KEY).cloned(),
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn round_trip_preserves_non_null_fields() {
		let hint = UiHintRequest::iframe("https://rp.example.com/loginiframe_refresh.htm")
			.with_lang("en-US")
			.with_icon("https://rp.example.com/icon.png");
		let decoded = UiHintRequest::decode(&hint.encode()).expect("Arguments should decode.");

		assert_eq!(decoded, hint);
	}

	#[test]
	fn null_fields_are_omitted_from_the_wire() {
		let hint = UiHintRequest { mode: Some(UI_MODE_IFRAME.into()), ..UiHintRequest::default() };
		let args = hint.encode();

		assert_eq!(args.len(), 1);
		assert_eq!(args.get(MODE_KEY).map(String::as_str), Some(UI_MODE_IFRAME));
	}

	#[test]
	fn decode_of_empty_arguments_is_none() {
		assert_eq!(UiHintRequest::decode(&BTreeMap::new()), None);
	}
}
