// std
use std::collections::BTreeMap;
// self
use oxygen_hybrid::extension::{
	AxAttribute, AxRequest, Extension, OAuthRequest, RegisterRequest, SregField, SregRequest,
	UiHintRequest, REGISTER_NS_URI, UI_NS_URI,
};

#[test]
fn ui_hint_round_trip_restores_every_non_null_field() {
	let full = UiHintRequest::iframe("https://rp.example.com/loginiframe_refresh.htm")
		.with_lang("de-DE")
		.with_icon("https://rp.example.com/icon.png");
	let sparse = UiHintRequest {
		refresh_url: Some("https://rp.example.com/loginiframe_refresh.htm".into()),
		..UiHintRequest::default()
	};

	for hint in [full, sparse] {
		let decoded =
			UiHintRequest::decode(&hint.encode()).expect("Encoded hint should decode back.");

		assert_eq!(decoded, hint);
	}
}

#[test]
fn register_intent_round_trip_defaults_the_mode() {
	let decoded = RegisterRequest::decode(&RegisterRequest::default().encode())
		.expect("Encoded intent should decode back.");

	assert_eq!(decoded.mode.as_deref(), Some("register"));

	let explicit = RegisterRequest::with_mode("invite");
	let decoded = RegisterRequest::decode(&explicit.encode())
		.expect("Encoded intent should decode back.");

	assert_eq!(decoded, explicit);
}

#[test]
fn decoders_return_none_for_empty_namespaces() {
	assert_eq!(UiHintRequest::decode(&BTreeMap::new()), None);
	assert_eq!(RegisterRequest::decode(&BTreeMap::new()), None);
}

#[test]
fn namespaces_carry_their_published_uris() {
	assert_eq!(UI_NS_URI, "http://specs.openid.net/extensions/ui/1.0");
	assert_eq!(REGISTER_NS_URI, "http://autodesk.com/openid/ext/register/1.0");

	let ui = Extension::UiHint(UiHintRequest::iframe("https://rp.example.com/r.htm"));

	assert_eq!(ui.namespace().uri, UI_NS_URI);
	assert_eq!(ui.namespace().alias, "ui");
}

#[test]
fn empty_variants_encode_to_empty_maps() {
	assert!(Extension::SimpleRegistration(SregRequest::default()).encode().is_empty());
	assert!(Extension::AttributeExchange(AxRequest::default()).encode().is_empty());
	assert!(!Extension::RegisterIntent(RegisterRequest::default()).encode().is_empty());
}

#[test]
fn request_side_encodings_cover_the_wire_format() {
	let sreg = SregRequest::new([SregField::Email, SregField::Fullname], [SregField::Nickname]);
	let args = sreg.encode();

	assert_eq!(args.get("required").map(String::as_str), Some("email,fullname"));
	assert_eq!(args.get("optional").map(String::as_str), Some("nickname"));

	let ax = AxRequest::new([AxAttribute::Uid], []);
	let args = ax.encode();

	assert_eq!(args.get("mode").map(String::as_str), Some("fetch_request"));
	assert_eq!(
		args.get("type.uid").map(String::as_str),
		Some("http://axschema.org/autodesk/userid"),
	);
	assert_eq!(args.get("required").map(String::as_str), Some("uid"));
	assert_eq!(args.get("if_available"), None);

	let oauth = OAuthRequest::new("consumer-key").with_scope("documents");
	let args = oauth.encode();

	assert_eq!(args.get("consumer").map(String::as_str), Some("consumer-key"));
	assert_eq!(args.get("scope").map(String::as_str), Some("documents"));
}
