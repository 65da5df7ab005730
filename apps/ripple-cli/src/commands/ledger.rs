//! Smaller components: notifications, status, trustlines, utilities.

use super::{Session, json_arg, params};
use anyhow::Result;
use clap::Subcommand;
use ripple_rest::{
    LedgerFilter, NotificationApi, StatusApi, TrustlineApi, TrustlineGrant, UtilityApi,
};
use serde_json::Value;

#[derive(Subcommand)]
pub enum NotificationCommand {
    /// Show the notification for a transaction
    Check { address: String, id: String },
}

impl NotificationCommand {
    pub async fn run(self, session: &Session) -> Result<Value> {
        let api = session.api::<NotificationApi>();
        match self {
            Self::Check { address, id } => Ok(api.check_notifications(&address, &id).await?),
        }
    }
}

#[derive(Subcommand)]
pub enum StatusCommand {
    /// Check whether the server is connected to the network
    Connected,
    /// Show server status
    Server,
}

impl StatusCommand {
    pub async fn run(self, session: &Session) -> Result<Value> {
        let api = session.api::<StatusApi>();
        let response = match self {
            Self::Connected => api.check_connection().await?,
            Self::Server => api.get_server_status().await?,
        };
        Ok(response)
    }
}

#[derive(Subcommand)]
pub enum TrustlineCommand {
    /// List trustlines
    List {
        address: String,
        /// Filter as JSON: currency, counterparty, marker, limit, ledger
        #[arg(long, value_name = "JSON")]
        params: Option<String>,
    },
    /// Create or modify a trustline (signed)
    Grant {
        address: String,
        /// Trustline as JSON: counterparty, currency, limit, ...
        #[arg(long, value_name = "JSON")]
        trustline: String,
    },
}

impl TrustlineCommand {
    pub async fn run(self, session: &Session) -> Result<Value> {
        let api = session.api::<TrustlineApi>();
        let response = match self {
            Self::List { address, params: raw } => {
                let filter: LedgerFilter = params(raw.as_deref())?;
                api.get_trustline(&address, &filter).await?
            }
            Self::Grant { address, trustline } => {
                let grant: TrustlineGrant = json_arg(&trustline, "--trustline")?;
                api.grant_trustline(&address, session.signing_secret(), &grant, session.validated)
                    .await?
            }
        };
        Ok(response)
    }
}

#[derive(Subcommand)]
pub enum UtilityCommand {
    /// Look up a transaction by hash
    Transaction { hash: String },
    /// Show the current transaction fee
    Fee,
    /// Generate a UUID for `client_resource_id`
    Uuid,
}

impl UtilityCommand {
    pub async fn run(self, session: &Session) -> Result<Value> {
        let api = session.api::<UtilityApi>();
        let response = match self {
            Self::Transaction { hash } => api.retrieve_ripple_transaction(&hash).await?,
            Self::Fee => api.retrieve_transaction_fee().await?,
            Self::Uuid => api.generate_uuid().await?,
        };
        Ok(response)
    }
}
