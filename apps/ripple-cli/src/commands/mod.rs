//! One subcommand group per component, one subcommand per operation.

mod account;
mod ledger;
mod order;
mod payment;

use anyhow::{Context, Result};
use clap::Subcommand;
use ripple_rest::{ComponentApi, ComponentRegistry};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

pub use account::AccountCommand;
pub use ledger::{NotificationCommand, StatusCommand, TrustlineCommand, UtilityCommand};
pub use order::OrderCommand;
pub use payment::PaymentCommand;

#[derive(Subcommand)]
pub enum Command {
    /// Wallets, balances and account settings
    #[command(subcommand)]
    Account(AccountCommand),
    /// Transaction notifications
    #[command(subcommand)]
    Notification(NotificationCommand),
    /// Currency-exchange orders
    #[command(subcommand)]
    Order(OrderCommand),
    /// Payments
    #[command(subcommand)]
    Payment(PaymentCommand),
    /// Server connectivity and status
    #[command(subcommand)]
    Status(StatusCommand),
    /// Trustlines
    #[command(subcommand)]
    Trustline(TrustlineCommand),
    /// Transactions, fees and UUIDs
    #[command(subcommand)]
    Utility(UtilityCommand),
}

impl Command {
    pub async fn run(self, session: &Session) -> Result<Value> {
        match self {
            Self::Account(cmd) => cmd.run(session).await,
            Self::Notification(cmd) => cmd.run(session).await,
            Self::Order(cmd) => cmd.run(session).await,
            Self::Payment(cmd) => cmd.run(session).await,
            Self::Status(cmd) => cmd.run(session).await,
            Self::Trustline(cmd) => cmd.run(session).await,
            Self::Utility(cmd) => cmd.run(session).await,
        }
    }
}

/// Everything a subcommand needs to issue its request.
pub struct Session {
    pub registry: ComponentRegistry,
    pub server_url: String,
    pub secret: Option<SecretString>,
    pub validated: bool,
}

impl Session {
    pub fn api<T: ComponentApi>(&self) -> Arc<T> {
        self.registry.api::<T>(&self.server_url)
    }

    /// The account secret, warning when a signing operation has none.
    pub fn signing_secret(&self) -> Option<&str> {
        let secret = self
            .secret
            .as_ref()
            .map(|s| s.expose_secret())
            .filter(|s| !s.is_empty());
        if secret.is_none() {
            tracing::warn!("no secret given (--secret or RIPPLE_SECRET); sending unsigned request");
        }
        secret
    }
}

/// Parse an optional JSON parameter bag, falling back to its default.
fn params<T: DeserializeOwned + Default>(raw: Option<&str>) -> Result<T> {
    raw.map_or_else(|| Ok(T::default()), |raw| json_arg(raw, "--params"))
}

fn json_arg<T: DeserializeOwned>(raw: &str, flag: &str) -> Result<T> {
    serde_json::from_str(raw).with_context(|| format!("invalid JSON for {flag}"))
}
