// self
use oxygen_hybrid::{
	error::ConfigError,
	extension::{Extension, ExtensionKind},
	provider::descriptor::{EnvironmentTier, ProviderDescriptor},
	request::{build_authentication_request, DispatchMethod, InitiationParams, RequestContext},
	url::Url,
};

fn ctx() -> RequestContext {
	RequestContext::from_parts("https", "rp.example.com").expect("Context fixture should build.")
}

fn kinds(extensions: &[Extension]) -> Vec<ExtensionKind> {
	extensions.iter().map(Extension::kind).collect()
}

#[test]
fn every_tier_resolves_to_its_fixed_endpoint() {
	let cases = [
		(EnvironmentTier::Dev, "https://accounts-dev.autodesk.com/"),
		(EnvironmentTier::Production, "https://accounts.autodesk.com/"),
		(EnvironmentTier::Staging, "https://accounts-staging.autodesk.com/"),
	];

	for (tier, expected) in cases {
		let descriptor = ProviderDescriptor::builder()
			.tier(tier)
			.build()
			.expect("Tier descriptor should build.");
		let resolved =
			descriptor.resolve_identifier(None).expect("Tier endpoint should resolve.");

		assert_eq!(resolved.as_str(), expected, "Tier {tier} should use its fixed endpoint.");
	}
}

#[test]
fn explicit_identifier_is_returned_verbatim() {
	let descriptor =
		ProviderDescriptor::builder().build().expect("Default descriptor should build.");
	let resolved = descriptor
		.resolve_identifier(Some("https://accounts.partner.example"))
		.expect("Explicit identifier should resolve.");

	assert_eq!(resolved.as_str(), "https://accounts.partner.example/");
}

#[test]
fn parameterless_staging_initiation_matches_the_contract() {
	let descriptor =
		ProviderDescriptor::builder().build().expect("Default descriptor should build.");
	let request = build_authentication_request(&descriptor, &InitiationParams::default(), &ctx())
		.expect("Bare initiation should build.");

	assert_eq!(request.endpoint.as_str(), "https://accounts-staging.autodesk.com/");
	assert_eq!(request.method, DispatchMethod::Post);
	assert_eq!(
		kinds(request.extensions()),
		vec![
			ExtensionKind::SimpleRegistration,
			ExtensionKind::AttributeExchange,
			ExtensionKind::UiHint,
		],
		"Without a consumer key or register flag, only the default extensions attach.",
	);
}

#[test]
fn oauth_parameter_attaches_the_hybrid_extension() {
	let descriptor =
		ProviderDescriptor::builder().build().expect("Default descriptor should build.");
	let params = InitiationParams::default().with_oauth_consumer("consumer-key");
	let request = build_authentication_request(&descriptor, &params, &ctx())
		.expect("Initiation should build.");

	assert!(kinds(request.extensions()).contains(&ExtensionKind::OAuthHybrid));

	let consumer = request.extensions().iter().find_map(|extension| match extension {
		Extension::OAuthHybrid(inner) => Some(inner.consumer.clone()),
		_ => None,
	});

	assert_eq!(consumer.as_deref(), Some("consumer-key"));
}

#[test]
fn register_flag_attaches_the_intent_extension() {
	let descriptor =
		ProviderDescriptor::builder().build().expect("Default descriptor should build.");
	let params = InitiationParams::default().with_register(true);
	let request = build_authentication_request(&descriptor, &params, &ctx())
		.expect("Initiation should build.");

	assert!(kinds(request.extensions()).contains(&ExtensionKind::RegisterIntent));
}

#[test]
fn descriptor_overrides_flow_into_the_request() {
	let descriptor = ProviderDescriptor::builder()
		.identifier(
			Url::parse("https://accounts.partner.example").expect("Override should parse."),
		)
		.identifier_param("idp")
		.build()
		.expect("Descriptor fixture should build.");
	let params = InitiationParams::from_query_pairs(&descriptor, [("idp", "")]);
	let request = build_authentication_request(&descriptor, &params, &ctx())
		.expect("Initiation should build.");

	assert_eq!(request.endpoint.as_str(), "https://accounts.partner.example/");
}

#[test]
fn builder_validation_rejects_broken_configuration() {
	assert!(matches!(
		ProviderDescriptor::builder().consumer_key("key").build(),
		Err(ConfigError::MissingConsumerSecret),
	));
	assert!(matches!(
		ProviderDescriptor::builder().logout_return_path("auth/oxygen").build(),
		Err(ConfigError::RelativePath { option: "logout_return_path", .. }),
	));
	assert!(matches!(
		ProviderDescriptor::builder().identifier_param("").build(),
		Err(ConfigError::EmptyIdentifierParam),
	));
}

#[test]
fn descriptor_serde_round_trips_with_redacted_debug() {
	let descriptor = ProviderDescriptor::builder()
		.tier(EnvironmentTier::Dev)
		.consumer("consumer-key", "consumer-secret")
		.build()
		.expect("Descriptor fixture should build.");
	let payload = serde_json::to_string(&descriptor).expect("Descriptor should serialize.");
	let restored: ProviderDescriptor =
		serde_json::from_str(&payload).expect("Descriptor should deserialize.");

	assert_eq!(restored, descriptor);
	assert!(
		!format!("{descriptor:?}").contains("consumer-secret"),
		"Debug output must redact the consumer secret.",
	);
}
