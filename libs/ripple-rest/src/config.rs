//! Client configuration.

use crate::request::{CallOptions, DEFAULT_USER_AGENT};
use ripple_http::{HttpClientConfig, TlsRootConfig, TransportSecurity};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root certificate source for HTTPS connections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsRoots {
    #[default]
    Webpki,
    Native,
}

/// Ripple REST client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RippleClientConfig {
    /// Base URL of the Ripple REST server, including the API version segment.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Client identification sent as `User-Agent`.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout.
    #[serde(default = "default_request_timeout", with = "humantime_duration")]
    pub request_timeout: Duration,

    /// Maximum accepted response body in bytes.
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,

    /// Permit plain `http://` server URLs.
    pub allow_insecure_http: bool,

    pub tls_roots: TlsRoots,
}

fn default_server_url() -> String {
    "http://localhost:5990/v1".to_owned()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_owned()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_max_body_size() -> usize {
    10 * 1024 * 1024
}

impl Default for RippleClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            user_agent: default_user_agent(),
            request_timeout: default_request_timeout(),
            max_body_size: default_max_body_size(),
            allow_insecure_http: false,
            tls_roots: TlsRoots::default(),
        }
    }
}

impl RippleClientConfig {
    /// Transport settings derived from this configuration.
    #[must_use]
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            request_timeout: self.request_timeout,
            max_body_size: self.max_body_size,
            user_agent: self.user_agent.clone(),
            transport: if self.allow_insecure_http {
                TransportSecurity::AllowInsecureHttp
            } else {
                TransportSecurity::TlsOnly
            },
            tls_roots: match self.tls_roots {
                TlsRoots::Webpki => TlsRootConfig::WebPki,
                TlsRoots::Native => TlsRootConfig::Native,
            },
            ..HttpClientConfig::default()
        }
    }

    /// Options attached to every dispatched call.
    #[must_use]
    pub fn call_options(&self) -> CallOptions {
        CallOptions::with_user_agent(self.user_agent.clone())
    }
}

/// `Duration` as a humantime string (`"30s"`, `"1m 30s"`).
mod humantime_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&humantime::format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}
