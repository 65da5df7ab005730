use super::{Session, json_arg, params};
use anyhow::Result;
use clap::Subcommand;
use ripple_rest::{AccountApi, AccountSettings, LedgerFilter};
use serde_json::Value;

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Generate keys for a new account
    GenerateWallet,
    /// Show account balances
    Balances {
        address: String,
        /// Filter as JSON: currency, counterparty, marker, limit, ledger
        #[arg(long, value_name = "JSON")]
        params: Option<String>,
    },
    /// Show account settings
    Settings { address: String },
    /// Update account settings (signed)
    UpdateSettings {
        address: String,
        /// Settings as JSON, e.g. '{"domain":"example.com"}'
        #[arg(long, value_name = "JSON")]
        settings: String,
    },
}

impl AccountCommand {
    pub async fn run(self, session: &Session) -> Result<Value> {
        let api = session.api::<AccountApi>();
        let response = match self {
            Self::GenerateWallet => api.generate_wallet().await?,
            Self::Balances { address, params: raw } => {
                let filter: LedgerFilter = params(raw.as_deref())?;
                api.get_account_balances(&address, &filter).await?
            }
            Self::Settings { address } => api.get_account_settings(&address).await?,
            Self::UpdateSettings { address, settings } => {
                let settings: AccountSettings = json_arg(&settings, "--settings")?;
                api.update_account_settings(
                    &address,
                    session.signing_secret(),
                    &settings,
                    session.validated,
                )
                .await?
            }
        };
        Ok(response)
    }
}
