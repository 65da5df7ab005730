use crate::builder::HttpClientBuilder;
use crate::config::TransportSecurity;
use crate::error::HttpError;
use crate::request::RequestBuilder;
use crate::response::ResponseBody;
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Full;
use std::future::Future;
use std::pin::Pin;
use std::task::Poll;
use tower::Service;
use tower::buffer::Buffer;

/// Future type of the inner service
pub(crate) type ServiceFuture =
    Pin<Box<dyn Future<Output = Result<Response<ResponseBody>, HttpError>> + Send>>;

/// Buffered service shared by all clones of an [`HttpClient`]
pub(crate) type BufferedService = Buffer<Request<Full<Bytes>>, ServiceFuture>;

/// HTTP client over a tower service stack
///
/// `HttpClient` is `Clone + Send + Sync`; cloning is a channel clone.
/// Requests go through an internal `tower::buffer::Buffer`, so callers do not
/// need to wrap the client in a mutex.
///
/// ```ignore
/// let client = HttpClient::builder().allow_insecure_http().build()?;
/// let fee: serde_json::Value = client
///     .get("http://localhost:5990/v1/transaction-fee")
///     .send()
///     .await?
///     .json()
///     .await?;
/// ```
#[derive(Clone)]
pub struct HttpClient {
    pub(crate) service: BufferedService,
    pub(crate) max_body_size: usize,
    pub(crate) transport_security: TransportSecurity,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("max_body_size", &self.max_body_size)
            .field("transport_security", &self.transport_security)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    ///
    /// # Errors
    /// Returns an error if TLS initialization fails
    pub fn new() -> Result<Self, HttpError> {
        HttpClientBuilder::new().build()
    }

    /// Create a builder for configuring the HTTP client
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Create a request builder for an arbitrary method
    ///
    /// The URL must be absolute (scheme and host); it is validated when the
    /// request is sent. Query strings are expected to be encoded already.
    pub fn request(&self, method: http::Method, url: &str) -> RequestBuilder {
        RequestBuilder::new(
            self.service.clone(),
            self.max_body_size,
            method,
            url.to_owned(),
            self.transport_security,
        )
    }

    /// Create a GET request builder
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::GET, url)
    }

    /// Create a POST request builder
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::POST, url)
    }

    /// Create a PUT request builder
    pub fn put(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::PUT, url)
    }

    /// Create a DELETE request builder
    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::DELETE, url)
    }
}

/// Map buffer errors to `HttpError`
///
/// The buffer either forwards the inner service error or reports that its
/// worker has shut down.
pub(crate) fn map_buffer_error(err: tower::BoxError) -> HttpError {
    match err.downcast::<HttpError>() {
        Ok(http_err) => *http_err,
        Err(err) => {
            tracing::error!(
                error = %err,
                "buffer worker closed unexpectedly; service unavailable"
            );
            HttpError::ServiceClosed
        }
    }
}

/// Try to acquire a buffer slot without waiting.
///
/// A full buffer yields `HttpError::Overloaded` immediately.
pub(crate) async fn try_acquire_buffer_slot(
    service: &mut BufferedService,
) -> Result<(), HttpError> {
    let poll_result = std::future::poll_fn(|cx| match service.poll_ready(cx) {
        Poll::Ready(result) => Poll::Ready(Some(result)),
        Poll::Pending => Poll::Ready(None),
    })
    .await;

    match poll_result {
        Some(Ok(())) => Ok(()),
        Some(Err(e)) => Err(map_buffer_error(e)),
        None => Err(HttpError::Overloaded),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn test_client() -> HttpClient {
        HttpClientBuilder::with_config(crate::HttpClientConfig::for_testing())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn get_returns_json_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(Method::GET).path("/v1/server/connected");
            then.status(200)
                .json_body(json!({"success": true, "connected": true}));
        });

        let client = test_client();
        let url = format!("{}/v1/server/connected", server.base_url());
        let body: serde_json::Value = client.get(&url).send().await.unwrap().json().await.unwrap();

        mock.assert();
        assert_eq!(body["connected"], true);
    }

    #[tokio::test]
    async fn post_sends_json_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(Method::POST)
                .path("/v1/accounts/rABC/payments")
                .query_param("validated", "true")
                .header("content-type", "application/json")
                .json_body(json!({"secret": "sSECRET"}));
            then.status(200).json_body(json!({"success": true}));
        });

        let client = test_client();
        let url = format!("{}/v1/accounts/rABC/payments?validated=true", server.base_url());
        let resp = client
            .post(&url)
            .json(&json!({"secret": "sSECRET"}))
            .unwrap()
            .send()
            .await
            .unwrap();

        mock.assert();
        assert_eq!(resp.status(), http::StatusCode::OK);
    }

    #[tokio::test]
    async fn delete_and_put_use_their_methods() {
        let server = MockServer::start();
        let delete = server.mock(|when, then| {
            when.method(Method::DELETE).path("/v1/accounts/rABC/orders/42");
            then.status(200).json_body(json!({"success": true}));
        });
        let put = server.mock(|when, then| {
            when.method(Method::PUT).path("/v1/anything");
            then.status(200).json_body(json!({"success": true}));
        });

        let client = test_client();
        client
            .delete(&format!("{}/v1/accounts/rABC/orders/42", server.base_url()))
            .send()
            .await
            .unwrap();
        client
            .put(&format!("{}/v1/anything", server.base_url()))
            .send()
            .await
            .unwrap();

        delete.assert();
        put.assert();
    }

    #[tokio::test]
    async fn default_user_agent_is_sent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(Method::GET)
                .path("/v1/uuid")
                .header("user-agent", crate::DEFAULT_USER_AGENT);
            then.status(200).json_body(json!({"uuid": "f9a6"}));
        });

        let client = test_client();
        client
            .get(&format!("{}/v1/uuid", server.base_url()))
            .send()
            .await
            .unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn error_status_surfaces_from_json() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(Method::GET).path("/v1/transactions/deadbeef");
            then.status(404)
                .json_body(json!({"success": false, "error": "txnNotFound"}));
        });

        let client = test_client();
        let err = client
            .get(&format!("{}/v1/transactions/deadbeef", server.base_url()))
            .send()
            .await
            .unwrap()
            .json::<serde_json::Value>()
            .await
            .unwrap_err();

        match err {
            HttpError::HttpStatus {
                status,
                body_preview,
                ..
            } => {
                assert_eq!(status, http::StatusCode::NOT_FOUND);
                assert!(body_preview.contains("txnNotFound"));
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn gzip_responses_are_decompressed() {
        use flate2::Compression;
        use flate2::write::GzEncoder;
        use std::io::Write;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(br#"{"fee":"0.000012"}"#).unwrap();
        let compressed = encoder.finish().unwrap();

        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(Method::GET).path("/v1/transaction-fee");
            then.status(200)
                .header("content-encoding", "gzip")
                .header("content-type", "application/json")
                .body(compressed);
        });

        let client = test_client();
        let body: serde_json::Value = client
            .get(&format!("{}/v1/transaction-fee", server.base_url()))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["fee"], "0.000012");
    }

    #[tokio::test]
    async fn tls_only_client_rejects_plain_http() {
        let client = HttpClient::new().unwrap();
        let err = client
            .get("http://localhost:5990/v1/server")
            .send()
            .await
            .unwrap_err();

        assert!(matches!(err, HttpError::InvalidScheme { ref scheme, .. } if scheme == "http"));
    }
}
