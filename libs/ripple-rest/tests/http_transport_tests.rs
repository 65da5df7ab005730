#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end dispatch through the HTTP transport against a mock server

use httpmock::prelude::*;
use ripple_rest::{
    ComponentKind, ComponentRegistry, DEFAULT_USER_AGENT, HttpError, LedgerFilter, Limit, OrderApi,
    PaymentApi, PaymentSubmission, RippleClientConfig, RippleError, StatusApi,
};
use serde_json::json;
use std::time::Duration;

fn config_for(server: &MockServer) -> RippleClientConfig {
    RippleClientConfig {
        server_url: format!("{}/v1", server.base_url()),
        allow_insecure_http: true,
        request_timeout: Duration::from_secs(5),
        ..RippleClientConfig::default()
    }
}

#[tokio::test]
async fn test_get_sends_payload_as_query_string() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::GET)
            .path("/v1/accounts/rABC/balances")
            .query_param("currency", "USD")
            .query_param("limit", "all")
            .header("user-agent", DEFAULT_USER_AGENT);
        then.status(200)
            .json_body(json!({"success": true, "balances": [{"currency": "USD", "value": "5"}]}));
    });

    let config = config_for(&server);
    let registry = ComponentRegistry::from_config(&config).unwrap();
    let filter = LedgerFilter {
        currency: Some("USD".to_owned()),
        limit: Some(Limit::All),
        ..LedgerFilter::default()
    };
    let response = registry
        .resolve(ComponentKind::Account, &config.server_url)
        .downcast::<ripple_rest::AccountApi>()
        .unwrap()
        .get_account_balances("rABC", &filter)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response["balances"][0]["value"], "5");
}

#[tokio::test]
async fn test_post_sends_json_body_with_secret() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::POST)
            .path("/v1/accounts/rABC/payments")
            .query_param("validated", "true")
            .header("content-type", "application/json")
            .json_body(json!({
                "payment": {"destination_account": "rDEF"},
                "client_resource_id": "f9a6",
                "secret": "sSECRET"
            }));
        then.status(200)
            .json_body(json!({"success": true, "status_url": "http://localhost/v1/accounts/rABC/payments/f9a6"}));
    });

    let config = config_for(&server);
    let registry = ComponentRegistry::from_config(&config).unwrap();
    let submission =
        PaymentSubmission::new(json!({"destination_account": "rDEF"})).with_client_resource_id("f9a6");
    let response = registry
        .api::<PaymentApi>(&config.server_url)
        .submit_payment("rABC", Some("sSECRET"), &submission, true)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response["success"], true);
}

#[tokio::test]
async fn test_delete_sends_secret_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::DELETE)
            .path("/v1/accounts/rABC/orders/42")
            .query_param("validated", "false")
            .json_body(json!({"secret": "sSECRET"}));
        then.status(200).json_body(json!({"success": true, "state": "pending"}));
    });

    let config = config_for(&server);
    let registry = ComponentRegistry::from_config(&config).unwrap();
    let response = registry
        .api::<OrderApi>(&config.server_url)
        .cancel_order("rABC", Some("sSECRET"), 42, false)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response["state"], "pending");
}

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::GET)
            .path("/v1/server/connected")
            .header("user-agent", "wallet/2.0");
        then.status(200).json_body(json!({"success": true, "connected": true}));
    });

    let config = RippleClientConfig {
        user_agent: "wallet/2.0".to_owned(),
        ..config_for(&server)
    };
    let registry = ComponentRegistry::from_config(&config).unwrap();
    registry
        .api::<StatusApi>(&config.server_url)
        .check_connection()
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn test_error_status_propagates_as_transport_error() {
    let server = MockServer::start();
    let _mock = server.mock(|when, then| {
        when.method(Method::GET).path("/v1/server");
        then.status(502)
            .json_body(json!({"success": false, "error": "rippled_busy"}));
    });

    let config = config_for(&server);
    let registry = ComponentRegistry::from_config(&config).unwrap();
    let err = registry
        .api::<StatusApi>(&config.server_url)
        .get_server_status()
        .await
        .unwrap_err();

    match err {
        RippleError::Transport(HttpError::HttpStatus {
            status,
            body_preview,
            ..
        }) => {
            assert_eq!(status.as_u16(), 502);
            assert!(body_preview.contains("rippled_busy"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_http_requires_opt_in() {
    let config = RippleClientConfig {
        server_url: "http://127.0.0.1:9/v1".to_owned(),
        ..RippleClientConfig::default()
    };
    let registry = ComponentRegistry::from_config(&config).unwrap();
    let err = registry
        .api::<StatusApi>(&config.server_url)
        .check_connection()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RippleError::Transport(HttpError::InvalidScheme { ref scheme, .. }) if scheme == "http"
    ));
}
