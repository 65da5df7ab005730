use crate::api::component_api;
use crate::dispatcher::RequestDispatcher;
use crate::error::Result;
use crate::request::Payload;
use serde_json::Value;

/// Server connectivity and status.
#[derive(Debug)]
pub struct StatusApi {
    dispatcher: RequestDispatcher,
}

component_api!(StatusApi, Status);

impl StatusApi {
    /// Whether the REST server is connected to the network.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn check_connection(&self) -> Result<Value> {
        self.dispatcher
            .issue("GET", "server/connected", Payload::new())
            .await
    }

    /// # Errors
    /// Propagates transport failures.
    pub async fn get_server_status(&self) -> Result<Value> {
        self.dispatcher.issue("GET", "server", Payload::new()).await
    }
}
