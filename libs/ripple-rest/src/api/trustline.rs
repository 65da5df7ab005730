use crate::api::component_api;
use crate::dispatcher::{RequestDispatcher, merge_secret, to_payload, with_validated, wrap_under};
use crate::error::Result;
use crate::models::{LedgerFilter, TrustlineGrant};
use serde_json::Value;

/// Trustline listing and granting.
#[derive(Debug)]
pub struct TrustlineApi {
    dispatcher: RequestDispatcher,
}

component_api!(TrustlineApi, Trustline);

impl TrustlineApi {
    /// Trustlines of `address`, optionally filtered.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn get_trustline(&self, address: &str, filter: &LedgerFilter) -> Result<Value> {
        self.dispatcher
            .issue("GET", &format!("accounts/{address}/trustlines"), to_payload(filter)?)
            .await
    }

    /// Create or modify a trustline; sent under the `trustlines` key.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn grant_trustline(
        &self,
        address: &str,
        secret: Option<&str>,
        trustline: &TrustlineGrant,
        validated: bool,
    ) -> Result<Value> {
        let path = with_validated(&format!("accounts/{address}/trustlines"), validated);
        let payload = merge_secret(wrap_under("trustlines", trustline)?, secret);
        self.dispatcher.issue("POST", &path, payload).await
    }
}
