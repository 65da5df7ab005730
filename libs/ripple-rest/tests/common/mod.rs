#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test utilities for ripple-rest integration tests

use async_trait::async_trait;
use parking_lot::Mutex;
use ripple_rest::{CallOptions, ComponentRegistry, HttpError, RequestSpec, Transport};
use serde_json::{Value, json};
use std::sync::Arc;

pub const SERVER_URL: &str = "https://rest.example.com/v1";

/// Transport that records every call and answers `{"success": true}`.
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<(RequestSpec, CallOptions)>>,
}

impl RecordingTransport {
    pub fn calls(&self) -> Vec<(RequestSpec, CallOptions)> {
        self.calls.lock().clone()
    }

    /// The single recorded request; panics if there were zero or several.
    pub fn only_request(&self) -> RequestSpec {
        let calls = self.calls.lock();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {}", calls.len());
        calls[0].0.clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn call(&self, spec: RequestSpec, options: &CallOptions) -> Result<Value, HttpError> {
        self.calls.lock().push((spec, options.clone()));
        Ok(json!({"success": true}))
    }
}

pub fn recording_registry() -> (Arc<RecordingTransport>, ComponentRegistry) {
    let transport = Arc::new(RecordingTransport::default());
    let registry = ComponentRegistry::new(transport.clone());
    (transport, registry)
}

pub fn payload_json(spec: &RequestSpec) -> Value {
    Value::Object(spec.payload.clone())
}
