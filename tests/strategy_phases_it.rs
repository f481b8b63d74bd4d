// self
use oxygen_hybrid::{
	_preludet::*,
	error::FailureReason,
	extension::{Extension, ExtensionKind},
	openid::{Dispatch, EngineError, OpenIdResponse, ResponseStatus},
	provider::descriptor::ProviderDescriptor,
	request::InitiationParams,
	strategy::{HttpAction, TransactionState, LOGOUT_PATH},
};

fn kinds(extensions: &[Extension]) -> Vec<ExtensionKind> {
	extensions.iter().map(Extension::kind).collect()
}

#[tokio::test]
async fn configured_consumer_attaches_the_hybrid_extension_end_to_end() {
	let strategy = build_test_strategy(staging_descriptor(), ScriptedEngine::reflecting());
	let mut transaction = strategy.transaction();

	transaction
		.initiate(&InitiationParams::default(), &test_request_context())
		.await
		.expect("Initiation should dispatch.");

	let sent = strategy.engine.last_request().expect("Engine should record the request.");

	assert_eq!(
		kinds(sent.extensions()),
		vec![
			ExtensionKind::SimpleRegistration,
			ExtensionKind::AttributeExchange,
			ExtensionKind::OAuthHybrid,
			ExtensionKind::UiHint,
		],
	);
	assert_eq!(sent.return_to.as_str(), "https://rp.example.com/auth/oxygen/callback");
}

#[tokio::test]
async fn in_band_responses_are_forwarded_unchanged() {
	let response = OpenIdResponse::unverified(ResponseStatus::Failure);
	let strategy = build_test_strategy(
		staging_descriptor(),
		ScriptedEngine::with_response(response.clone()),
	);
	let mut transaction = strategy.transaction();
	let dispatch = transaction
		.initiate(&InitiationParams::default().with_immediate(true), &test_request_context())
		.await
		.expect("Immediate-mode initiation should dispatch.");

	assert_eq!(dispatch, Dispatch::Response(response));
	assert_eq!(transaction.state(), TransactionState::Requested);
}

#[tokio::test]
async fn timeout_and_failure_reach_distinct_terminal_states() {
	let strategy =
		build_test_strategy(staging_descriptor(), ScriptedEngine::failing(EngineError::Timeout));
	let mut transaction = strategy.transaction();
	let err = transaction
		.initiate(&InitiationParams::default(), &test_request_context())
		.await
		.expect_err("Timed-out initiation should fail.");

	assert_eq!(err.failure_reason(), Some(FailureReason::ConnectionFailed));
	assert_eq!(transaction.state(), TransactionState::TimedOut);
	assert_eq!(transaction.state().as_str(), "timed_out");

	let strategy = build_test_strategy(
		staging_descriptor(),
		ScriptedEngine::failing(EngineError::Protocol { message: "association failed".into() }),
	);
	let mut transaction = strategy.transaction();

	transaction
		.initiate(&InitiationParams::default(), &test_request_context())
		.await
		.expect_err("Failed initiation should fail.");

	assert_eq!(transaction.state(), TransactionState::Failed);
}

#[tokio::test]
async fn callback_success_exposes_uid_info_and_empty_extra() {
	let strategy = build_test_strategy(
		staging_descriptor(),
		ScriptedEngine::with_response(hybrid_success_response(Some("rt-123"))),
	);
	let mut transaction = strategy.transaction();
	let outcome = transaction
		.callback(&BTreeMap::new(), &test_request_context())
		.await
		.expect("Successful callback should produce an outcome.");

	assert_eq!(outcome.uid.as_deref(), Some("u-100"));
	assert!(outcome.extra.is_empty());
	assert_eq!(transaction.state(), TransactionState::Success);
}

#[tokio::test]
async fn logout_redirect_targets_the_provider_logout_endpoint() {
	let descriptor =
		ProviderDescriptor::builder().build().expect("Default descriptor should build.");
	let strategy = build_test_strategy(descriptor, ScriptedEngine::reflecting());
	let transaction = strategy.transaction();
	let action = transaction
		.handle_other(LOGOUT_PATH, &test_request_context())
		.expect("Logout action should derive.");
	let HttpAction::Redirect { status, content_type, location, body } = action else {
		panic!("Logout path must redirect.");
	};

	assert_eq!(status, 302);
	assert_eq!(content_type, "text");
	assert_eq!(body, "302 found");
	assert_eq!(
		location.as_str(),
		"https://accounts-staging.autodesk.com/Authentication/LogOut\
		 ?ReturnToUrl=https%3A%2F%2Frp.example.com%2Fauth%2Foxygen",
	);
}

#[tokio::test]
async fn unrelated_paths_pass_through() {
	let strategy = build_test_strategy(staging_descriptor(), ScriptedEngine::reflecting());
	let transaction = strategy.transaction();

	assert_eq!(
		transaction
			.handle_other("/auth/other-provider", &test_request_context())
			.expect("Action should derive."),
		HttpAction::PassThrough,
	);
}
