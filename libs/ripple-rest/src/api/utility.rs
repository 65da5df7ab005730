use crate::api::component_api;
use crate::dispatcher::RequestDispatcher;
use crate::error::Result;
use crate::request::Payload;
use serde_json::Value;

/// Transactions, fees and identifiers.
#[derive(Debug)]
pub struct UtilityApi {
    dispatcher: RequestDispatcher,
}

component_api!(UtilityApi, Utility);

impl UtilityApi {
    /// Look up a transaction by hash.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn retrieve_ripple_transaction(&self, hash: &str) -> Result<Value> {
        self.dispatcher
            .issue("GET", &format!("transactions/{hash}"), Payload::new())
            .await
    }

    /// Current transaction fee in XRP.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn retrieve_transaction_fee(&self) -> Result<Value> {
        self.dispatcher
            .issue("GET", "transaction-fee", Payload::new())
            .await
    }

    /// A fresh UUID, suitable as a payment `client_resource_id`.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn generate_uuid(&self) -> Result<Value> {
        self.dispatcher.issue("GET", "uuid", Payload::new()).await
    }
}
