//! Request value objects handed to the transport.

use crate::verb::Verb;
use serde_json::{Map, Value};

/// Flat string-keyed payload of a request (query parameters or JSON body).
pub type Payload = Map<String, Value>;

/// Default client identification sent with every request.
pub const DEFAULT_USER_AGENT: &str =
    concat!("Ripple REST Rust Client/", env!("CARGO_PKG_VERSION"));

/// A fully shaped request: verb, absolute URL and payload.
///
/// Built per call and consumed by [`Transport::call`](crate::Transport::call).
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub verb: Verb,
    pub url: String,
    pub payload: Payload,
}

impl RequestSpec {
    #[must_use]
    pub fn new(verb: Verb, url: impl Into<String>, payload: Payload) -> Self {
        Self {
            verb,
            url: url.into(),
            payload,
        }
    }
}

/// Body encoding announced to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    #[default]
    Json,
}

impl ContentType {
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Json => "application/json",
        }
    }
}

/// Per-call options fixed by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOptions {
    pub content_type: ContentType,
    pub user_agent: String,
}

impl CallOptions {
    #[must_use]
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::Json,
            user_agent: user_agent.into(),
        }
    }
}

impl Default for CallOptions {
    fn default() -> Self {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }
}
