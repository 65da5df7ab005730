//! Transport seam between the dispatch layer and the network.

use crate::config::RippleClientConfig;
use crate::dispatcher::format_flag;
use crate::request::{CallOptions, Payload, RequestSpec};
use async_trait::async_trait;
use ripple_http::{HttpClient, HttpClientBuilder, HttpError, InvalidUriKind};
use serde_json::Value;

/// Performs one request and returns the decoded response body verbatim.
///
/// Implementations own serialization, connection handling and status
/// handling. The dispatch layer never inspects the returned value.
#[async_trait]
pub trait Transport: Send + Sync {
    /// # Errors
    /// Network, TLS, timeout, status and decoding failures, unchanged.
    async fn call(&self, spec: RequestSpec, options: &CallOptions) -> Result<Value, HttpError>;
}

/// [`Transport`] over [`ripple_http::HttpClient`].
///
/// GET payloads are appended to the URL as query pairs; every other verb
/// sends the payload as a JSON body.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: HttpClient,
}

impl HttpTransport {
    #[must_use]
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Build the underlying HTTP client from client configuration.
    ///
    /// # Errors
    /// Returns an error if TLS initialization fails or the configured
    /// user agent is not a valid header value.
    pub fn from_config(config: &RippleClientConfig) -> Result<Self, HttpError> {
        let client = HttpClientBuilder::with_config(config.http_client_config()).build()?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, spec: RequestSpec, options: &CallOptions) -> Result<Value, HttpError> {
        let method = http::Method::from(spec.verb);
        let url = if spec.verb.uses_query() {
            append_query(&spec.url, &spec.payload)?
        } else {
            spec.url
        };

        let mut request = self
            .client
            .request(method, &url)
            .header("content-type", options.content_type.mime())
            .header("user-agent", &options.user_agent);
        if !spec.verb.uses_query() {
            request = request.json(&spec.payload)?;
        }

        request.send().await?.json::<Value>().await
    }
}

/// Append payload entries to `url` as query pairs.
///
/// An empty payload leaves the URL untouched. Null values are skipped.
fn append_query(url: &str, payload: &Payload) -> Result<String, HttpError> {
    if payload.is_empty() {
        return Ok(url.to_owned());
    }

    let mut parsed = url::Url::parse(url).map_err(|e| HttpError::InvalidUri {
        url: url.to_owned(),
        kind: InvalidUriKind::ParseError,
        reason: e.to_string(),
    })?;

    {
        let mut pairs = parsed.query_pairs_mut();
        for (key, value) in payload {
            if let Some(value) = query_value(value) {
                pairs.append_pair(key, &value);
            }
        }
    }

    Ok(parsed.into())
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(format_flag(*flag).to_owned()),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn empty_payload_keeps_url_verbatim() {
        let url = "http://localhost:5990/v1//accounts/rABC/payments";
        assert_eq!(append_query(url, &Payload::new()).unwrap(), url);
    }

    #[test]
    fn scalars_are_encoded_as_query_pairs() {
        let url = append_query(
            "https://host/v1/accounts/rABC/balances",
            &payload(json!({
                "currency": "USD",
                "limit": 10,
                "exclude_failed": true,
                "marker": null
            })),
        )
        .unwrap();

        let parsed = url::Url::parse(&url).unwrap();
        assert_eq!(parsed.path(), "/v1/accounts/rABC/balances");
        let mut pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("currency".to_owned(), "USD".to_owned()),
                ("exclude_failed".to_owned(), "true".to_owned()),
                ("limit".to_owned(), "10".to_owned()),
            ]
        );
    }

    #[test]
    fn existing_query_is_extended() {
        let url = append_query(
            "https://host/v1/accounts/rABC/payments?validated=false",
            &payload(json!({"page": 2})),
        )
        .unwrap();
        assert_eq!(url, "https://host/v1/accounts/rABC/payments?validated=false&page=2");
    }

    #[test]
    fn unparsable_url_is_reported() {
        let err = append_query("accounts/rABC", &payload(json!({"a": 1}))).unwrap_err();
        assert!(matches!(
            err,
            HttpError::InvalidUri {
                kind: InvalidUriKind::ParseError,
                ..
            }
        ));
    }

    #[test]
    fn nested_values_are_compact_json() {
        assert_eq!(
            query_value(&json!({"currency": "USD"})).as_deref(),
            Some(r#"{"currency":"USD"}"#)
        );
        assert_eq!(query_value(&json!(false)).as_deref(), Some("false"));
    }
}
