use solace_gateway::presentation::config::Environment;
use solace_gateway::presentation::handlers::ErrorResponse;

#[derive(Debug, thiserror::Error)]
#[error("inner cause")]
struct Inner;

#[derive(Debug, thiserror::Error)]
#[error("outer failure")]
struct Outer {
    #[source]
    inner: Inner,
}

#[test]
fn given_message_when_built_then_details_are_omitted() {
    let response = ErrorResponse::message("Failed to generate speech");

    assert_eq!(response.error, "Failed to generate speech");
    assert!(response.details.is_none());

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json, serde_json::json!({ "error": "Failed to generate speech" }));
}

#[test]
fn given_local_environment_when_details_built_then_source_chain_is_appended() {
    let cause = Outer { inner: Inner };
    let response = ErrorResponse::with_details("Failed to process audio", &cause, Environment::Local);

    assert_eq!(response.error, "Failed to process audio");
    assert_eq!(response.details.as_deref(), Some("outer failure: inner cause"));
}

#[test]
fn given_prod_environment_when_details_built_then_source_chain_is_hidden() {
    let cause = Outer { inner: Inner };
    let response = ErrorResponse::with_details("Failed to process audio", &cause, Environment::Prod);

    assert_eq!(response.details.as_deref(), Some("outer failure"));
}

#[test]
fn given_error_without_source_when_details_built_then_only_message_is_kept() {
    let cause = Inner;
    let response = ErrorResponse::with_details("Failed to generate tips", &cause, Environment::Local);

    assert_eq!(response.details.as_deref(), Some("inner cause"));
}
