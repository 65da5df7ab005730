use super::*;
use async_trait::async_trait;
use ripple_http::HttpError;
use serde_json::json;

/// Echoes the request back so tests can see what reached the transport.
struct EchoTransport;

#[async_trait]
impl Transport for EchoTransport {
    async fn call(&self, spec: RequestSpec, options: &CallOptions) -> std::result::Result<Value, HttpError> {
        Ok(json!({
            "verb": spec.verb.as_str(),
            "url": spec.url,
            "payload": spec.payload,
            "user_agent": options.user_agent,
            "content_type": options.content_type.mime(),
        }))
    }
}

struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn call(&self, _spec: RequestSpec, _options: &CallOptions) -> std::result::Result<Value, HttpError> {
        Err(HttpError::Overloaded)
    }
}

fn dispatcher(base: &str) -> RequestDispatcher {
    RequestDispatcher::new(base, Arc::new(EchoTransport), CallOptions::default())
}

fn obj(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn build_url_joins_with_one_slash() {
    let d = dispatcher("https://host/v1");
    assert_eq!(
        d.build_url("accounts/r123/balances"),
        "https://host/v1/accounts/r123/balances"
    );
}

#[test]
fn build_url_does_not_normalize() {
    assert_eq!(dispatcher("https://host/v1/").build_url("uuid"), "https://host/v1//uuid");
    assert_eq!(
        dispatcher("https://host/v1").build_url("/accounts/rABC/payments"),
        "https://host/v1//accounts/rABC/payments"
    );
}

#[test]
fn set_server_url_chains_and_applies() {
    let d = dispatcher("https://a/v1");
    assert_eq!(d.set_server_url("https://b/v1").build_url("uuid"), "https://b/v1/uuid");
    assert_eq!(d.server_url(), "https://b/v1");
}

#[test]
fn merge_secret_adds_non_empty_secret() {
    let merged = merge_secret(obj(json!({"a": 1})), Some("s3cr3t"));
    assert_eq!(Value::Object(merged), json!({"a": 1, "secret": "s3cr3t"}));
}

#[test]
fn merge_secret_skips_missing_or_empty_secret() {
    let merged = merge_secret(obj(json!({"a": 1})), None);
    assert_eq!(Value::Object(merged), json!({"a": 1}));

    let merged = merge_secret(obj(json!({"a": 1})), Some(""));
    assert!(!merged.contains_key("secret"));
}

#[test]
fn merge_secret_keeps_existing_secret() {
    let merged = merge_secret(obj(json!({"secret": "first"})), Some("second"));
    assert_eq!(merged["secret"], "first");
}

#[test]
fn format_flag_is_lowercase() {
    assert_eq!(format_flag(true), "true");
    assert_eq!(format_flag(false), "false");
    assert_eq!(with_validated("accounts/rABC/orders", false), "accounts/rABC/orders?validated=false");
}

#[test]
fn prepare_rejects_unknown_verb() {
    let err = dispatcher("https://host/v1")
        .prepare("PATCH", "uuid", Payload::new())
        .unwrap_err();
    assert!(matches!(err, RippleError::UnsupportedMethod { ref method } if method == "PATCH"));
}

#[test]
fn to_payload_requires_an_object() {
    assert!(to_payload(&json!({"limit": 10})).is_ok());
    let err = to_payload(&json!([1, 2])).unwrap_err();
    assert!(matches!(err, RippleError::InvalidPayload(ref m) if m.contains("an array")));
}

#[test]
fn wrap_under_nests_body() {
    let payload = wrap_under("order", &json!({"type": "buy"})).unwrap();
    assert_eq!(Value::Object(payload), json!({"order": {"type": "buy"}}));
}

#[tokio::test]
async fn issue_forwards_spec_and_fixed_options() {
    let d = RequestDispatcher::new(
        "https://host/v1",
        Arc::new(EchoTransport),
        CallOptions::with_user_agent("wallet-test/0.1"),
    );
    let echoed = d
        .issue("POST", "accounts/rABC/orders?validated=true", obj(json!({"order": {}})))
        .await
        .unwrap();

    assert_eq!(echoed["verb"], "POST");
    assert_eq!(echoed["url"], "https://host/v1/accounts/rABC/orders?validated=true");
    assert_eq!(echoed["payload"], json!({"order": {}}));
    assert_eq!(echoed["user_agent"], "wallet-test/0.1");
    assert_eq!(echoed["content_type"], "application/json");
}

#[tokio::test]
async fn issue_propagates_transport_errors() {
    let d = RequestDispatcher::new("https://host/v1", Arc::new(FailingTransport), CallOptions::default());
    let err = d.issue("GET", "server", Payload::new()).await.unwrap_err();
    assert!(matches!(err, RippleError::Transport(HttpError::Overloaded)));
}

#[tokio::test]
async fn issue_fails_before_transport_on_bad_verb() {
    let d = RequestDispatcher::new("https://host/v1", Arc::new(FailingTransport), CallOptions::default());
    let err = d.issue("HEAD", "server", Payload::new()).await.unwrap_err();
    assert!(matches!(err, RippleError::UnsupportedMethod { .. }));
}
