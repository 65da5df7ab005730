use crate::client::{BufferedService, map_buffer_error, try_acquire_buffer_slot};
use crate::config::TransportSecurity;
use crate::error::{HttpError, InvalidUriKind};
use crate::response::{HttpResponse, ResponseBody};
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{Request, Response};
use http_body_util::Full;
use serde::Serialize;
use tower::Service;

/// HTTP request builder with fluent API
///
/// Created by [`HttpClient::get`](crate::HttpClient::get) and friends.
/// Header errors are deferred and reported by [`send`](RequestBuilder::send).
///
/// The builder does not compose query strings; encode them into the URL
/// before creating the request (e.g. with `url::Url::query_pairs_mut`).
#[must_use = "RequestBuilder does nothing until .send() is called"]
pub struct RequestBuilder {
    service: BufferedService,
    max_body_size: usize,
    method: http::Method,
    url: String,
    headers: Vec<(HeaderName, HeaderValue)>,
    body: Option<Bytes>,
    error: Option<HttpError>,
    transport_security: TransportSecurity,
}

impl RequestBuilder {
    pub(crate) fn new(
        service: BufferedService,
        max_body_size: usize,
        method: http::Method,
        url: String,
        transport_security: TransportSecurity,
    ) -> Self {
        Self {
            service,
            max_body_size,
            method,
            url,
            headers: Vec::new(),
            body: None,
            error: None,
            transport_security,
        }
    }

    /// Add a single header to the request
    ///
    /// Setting `content-type` here overrides the JSON default of [`json`](Self::json);
    /// setting `user-agent` overrides the client-wide default.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if self.error.is_some() {
            return self;
        }

        match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            (Ok(name), Ok(value)) => self.headers.push((name, value)),
            (Err(e), _) => self.error = Some(HttpError::InvalidHeaderName(e)),
            (_, Err(e)) => self.error = Some(HttpError::InvalidHeaderValue(e)),
        }
        self
    }

    /// Set request body as JSON
    ///
    /// Adds `content-type: application/json` unless a content type was set explicitly.
    ///
    /// # Errors
    /// Returns `HttpError::Json` if serialization fails, or a deferred header error.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, HttpError> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }

        self.body = Some(Bytes::from(serde_json::to_vec(body)?));
        if !self.has_header(&http::header::CONTENT_TYPE) {
            self.headers.push((
                http::header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ));
        }
        Ok(self)
    }

    fn has_header(&self, name: &HeaderName) -> bool {
        self.headers.iter().any(|(n, _)| n == name)
    }

    /// Parse the URL and check its scheme against the transport security mode.
    fn validate_url(&self) -> Result<http::Uri, HttpError> {
        let invalid = |kind, reason: String| HttpError::InvalidUri {
            url: self.url.clone(),
            kind,
            reason,
        };

        let uri: http::Uri = self
            .url
            .parse()
            .map_err(|e: http::uri::InvalidUri| invalid(InvalidUriKind::ParseError, e.to_string()))?;

        if uri.authority().is_none() {
            return Err(invalid(
                InvalidUriKind::MissingAuthority,
                "missing host/authority".to_owned(),
            ));
        }

        match uri.scheme_str() {
            Some("https") => Ok(uri),
            Some("http") => match self.transport_security {
                TransportSecurity::AllowInsecureHttp => Ok(uri),
                TransportSecurity::TlsOnly => Err(HttpError::InvalidScheme {
                    scheme: "http".to_owned(),
                    reason: "HTTPS required (transport security is TlsOnly)".to_owned(),
                }),
            },
            Some(scheme) => Err(HttpError::InvalidScheme {
                scheme: scheme.to_owned(),
                reason: "only http:// and https:// schemes are supported".to_owned(),
            }),
            None => Err(invalid(InvalidUriKind::MissingScheme, "missing scheme".to_owned())),
        }
    }

    /// Send the request and return the response
    ///
    /// Any HTTP status is returned as `Ok`; use the checked body readers on
    /// [`HttpResponse`] to turn non-2xx statuses into errors.
    ///
    /// # Errors
    /// Returns `HttpError` for deferred builder errors, URL or scheme
    /// violations, transport failures, timeouts, and a full request buffer.
    pub async fn send(mut self) -> Result<HttpResponse, HttpError> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }

        let uri = self.validate_url()?;

        let mut builder = Request::builder().method(self.method).uri(uri);
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }
        let request = builder.body(Full::new(self.body.unwrap_or_default()))?;

        try_acquire_buffer_slot(&mut self.service).await?;

        let inner: Response<ResponseBody> =
            self.service.call(request).await.map_err(map_buffer_error)?;

        Ok(HttpResponse {
            inner,
            max_body_size: self.max_body_size,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::{HttpClient, HttpClientConfig, HttpError, InvalidUriKind};
    use httpmock::prelude::*;
    use serde_json::json;

    fn test_client() -> HttpClient {
        crate::HttpClientBuilder::with_config(HttpClientConfig::for_testing())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn relative_url_is_rejected() {
        let err = test_client()
            .get("/accounts/rABC/balances")
            .send()
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            HttpError::InvalidUri {
                kind: InvalidUriKind::MissingAuthority,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unsupported_scheme_is_rejected() {
        let err = test_client()
            .get("ftp://rest.example.com/v1/server")
            .send()
            .await
            .unwrap_err();

        assert!(matches!(err, HttpError::InvalidScheme { ref scheme, .. } if scheme == "ftp"));
    }

    #[tokio::test]
    async fn invalid_header_is_deferred_to_send() {
        let err = test_client()
            .get("http://localhost:5990/v1/server")
            .header("bad header", "value")
            .send()
            .await
            .unwrap_err();

        assert!(matches!(err, HttpError::InvalidHeaderName(_)));
    }

    #[tokio::test]
    async fn explicit_headers_win_over_defaults() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(Method::POST)
                .path("/v1/accounts/rABC/orders")
                .header("content-type", "application/vnd.ripple+json")
                .header("user-agent", "Ripple REST Rust Client/1.0");
            then.status(200).json_body(json!({"success": true}));
        });

        test_client()
            .post(&format!("{}/v1/accounts/rABC/orders", server.base_url()))
            .header("content-type", "application/vnd.ripple+json")
            .header("user-agent", "Ripple REST Rust Client/1.0")
            .json(&json!({"order": {}}))
            .unwrap()
            .send()
            .await
            .unwrap();

        mock.assert();
    }
}
