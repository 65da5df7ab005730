use crate::api::component_api;
use crate::dispatcher::{RequestDispatcher, merge_secret, to_payload, with_validated, wrap_under};
use crate::error::Result;
use crate::models::{AccountSettings, LedgerFilter};
use crate::request::Payload;
use serde_json::Value;

/// Wallet generation, balances and account settings.
#[derive(Debug)]
pub struct AccountApi {
    dispatcher: RequestDispatcher,
}

component_api!(AccountApi, Account);

impl AccountApi {
    /// Randomly generate keys for a potential new account.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn generate_wallet(&self) -> Result<Value> {
        self.dispatcher
            .issue("GET", "wallet/new", Payload::new())
            .await
    }

    /// Current balances of `address`, optionally filtered.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn get_account_balances(&self, address: &str, filter: &LedgerFilter) -> Result<Value> {
        self.dispatcher
            .issue("GET", &format!("accounts/{address}/balances"), to_payload(filter)?)
            .await
    }

    /// # Errors
    /// Propagates transport failures.
    pub async fn get_account_settings(&self, address: &str) -> Result<Value> {
        self.dispatcher
            .issue("GET", &format!("accounts/{address}/settings"), Payload::new())
            .await
    }

    /// Change account settings. Omitted fields stay as they are.
    ///
    /// With `validated` the server answers only once the transaction is
    /// validated by the network.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn update_account_settings(
        &self,
        address: &str,
        secret: Option<&str>,
        settings: &AccountSettings,
        validated: bool,
    ) -> Result<Value> {
        let path = with_validated(&format!("accounts/{address}/settings"), validated);
        let payload = merge_secret(wrap_under("settings", settings)?, secret);
        self.dispatcher.issue("POST", &path, payload).await
    }
}
