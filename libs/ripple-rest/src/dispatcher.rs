use crate::error::{Result, RippleError};
use crate::request::{CallOptions, Payload, RequestSpec};
use crate::transport::Transport;
use crate::verb::{self, Verb};
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Request-shaping capability shared by every component handler.
///
/// Holds the bound server URL, the transport and the fixed call options.
/// Handlers own one dispatcher each and delegate every operation to
/// [`issue`](Self::issue).
///
/// The server URL sits behind a lock so a handler shared through an `Arc`
/// can be re-pointed with [`set_server_url`](Self::set_server_url); the new
/// URL applies to every later call by every holder.
pub struct RequestDispatcher {
    server_url: RwLock<String>,
    transport: Arc<dyn Transport>,
    options: CallOptions,
}

impl fmt::Debug for RequestDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDispatcher")
            .field("server_url", &*self.server_url.read())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl RequestDispatcher {
    #[must_use]
    pub fn new(
        server_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        options: CallOptions,
    ) -> Self {
        Self {
            server_url: RwLock::new(server_url.into()),
            transport,
            options,
        }
    }

    /// Replace the bound base URL.
    pub fn set_server_url(&self, url: impl Into<String>) -> &Self {
        *self.server_url.write() = url.into();
        self
    }

    #[must_use]
    pub fn server_url(&self) -> String {
        self.server_url.read().clone()
    }

    #[must_use]
    pub fn options(&self) -> &CallOptions {
        &self.options
    }

    /// Join the server URL and `suffix` with a single `/`.
    ///
    /// Neither side is normalized: a trailing slash on the base or a leading
    /// slash on the suffix is kept as is.
    #[must_use]
    pub fn build_url(&self, suffix: &str) -> String {
        format!("{}/{suffix}", self.server_url.read())
    }

    /// See [`verb::resolve_verb`].
    ///
    /// # Errors
    /// Returns [`RippleError::UnsupportedMethod`] for unknown tokens.
    pub fn resolve_verb(&self, token: &str) -> Result<Verb> {
        verb::resolve_verb(token)
    }

    /// Resolve the verb and compose the absolute URL without sending anything.
    ///
    /// # Errors
    /// Returns [`RippleError::UnsupportedMethod`] for unknown verb tokens.
    pub fn prepare(&self, method: &str, path: &str, payload: Payload) -> Result<RequestSpec> {
        let verb = self.resolve_verb(method)?;
        Ok(RequestSpec::new(verb, self.build_url(path), payload))
    }

    /// Shape the request and hand it to the transport.
    ///
    /// The transport's answer is returned unmodified; its errors are wrapped
    /// in [`RippleError::Transport`] and nothing is retried.
    ///
    /// # Errors
    /// Returns [`RippleError::UnsupportedMethod`] before any I/O for unknown
    /// verbs, otherwise whatever the transport reports.
    pub async fn issue(&self, method: &str, path: &str, payload: Payload) -> Result<Value> {
        let spec = self.prepare(method, path, payload)?;
        tracing::debug!(verb = %spec.verb, url = %spec.url, "issuing ripple rest request");
        Ok(self.transport.call(spec, &self.options).await?)
    }
}

/// Add `secret` to `payload` when a non-empty secret is given.
///
/// `None` and `Some("")` return the payload unchanged, so no `secret: null`
/// key is ever produced. An existing `secret` entry is never overwritten.
#[must_use]
pub fn merge_secret(mut payload: Payload, secret: Option<&str>) -> Payload {
    if let Some(secret) = secret.filter(|s| !s.is_empty()) {
        payload
            .entry("secret")
            .or_insert_with(|| Value::String(secret.to_owned()));
    }
    payload
}

/// Lowercase string form of a boolean for query strings.
#[must_use]
pub const fn format_flag(flag: bool) -> &'static str {
    if flag { "true" } else { "false" }
}

/// Serialize a parameter bag or body into a [`Payload`].
///
/// # Errors
/// Returns [`RippleError::InvalidPayload`] when `value` does not serialize
/// to a JSON object.
pub fn to_payload<T: Serialize + ?Sized>(value: &T) -> Result<Payload> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(RippleError::InvalidPayload(format!(
            "expected a JSON object, got {}",
            json_type(&other)
        ))),
        Err(e) => Err(RippleError::InvalidPayload(e.to_string())),
    }
}

/// Wrap `body` under `key`: `{key: body}`.
pub(crate) fn wrap_under<T: Serialize + ?Sized>(key: &str, body: &T) -> Result<Payload> {
    let value =
        serde_json::to_value(body).map_err(|e| RippleError::InvalidPayload(e.to_string()))?;
    let mut payload = Payload::new();
    payload.insert(key.to_owned(), value);
    Ok(payload)
}

/// Append the `validated` flag to a path.
pub(crate) fn with_validated(path: &str, validated: bool) -> String {
    format!("{path}?validated={}", format_flag(validated))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[path = "dispatcher_tests.rs"]
mod dispatcher_tests;
