#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! HTTP transport for the Ripple REST client.
//!
//! A hyper-based client wrapped in a small tower stack:
//! - TLS via rustls (HTTPS only unless insecure HTTP is explicitly allowed)
//! - Connection pooling
//! - Per-request timeout
//! - User-Agent header injection
//! - Transparent response decompression (gzip, brotli, deflate)
//! - Fail-fast request buffer instead of a mutex around the client
//!
//! The transport never retries and never follows redirects. Whatever the
//! server answers is handed back to the caller; non-2xx statuses become
//! [`HttpError::HttpStatus`] only when the body is read with a checked
//! accessor such as [`HttpResponse::json`].
//!
//! # Example
//!
//! ```ignore
//! use ripple_http::HttpClient;
//! use std::time::Duration;
//!
//! let client = HttpClient::builder()
//!     .timeout(Duration::from_secs(10))
//!     .user_agent("my-wallet/1.0")
//!     .build()?;
//!
//! let status: serde_json::Value = client
//!     .get("https://rest.example.com/v1/server")
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! ```

mod builder;
mod client;
mod config;
mod error;
mod layers;
mod request;
mod response;
mod tls;

pub use builder::HttpClientBuilder;
pub use client::HttpClient;
pub use config::{
    DEFAULT_USER_AGENT, ERROR_BODY_PREVIEW_LIMIT, HttpClientConfig, TlsRootConfig,
    TransportSecurity,
};
pub use error::{HttpError, InvalidUriKind};
pub use layers::{UserAgentLayer, UserAgentService};
pub use request::RequestBuilder;
pub use response::{HttpResponse, ResponseBody};
