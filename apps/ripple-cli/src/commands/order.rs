use super::{Session, json_arg, params};
use anyhow::Result;
use clap::Subcommand;
use ripple_rest::{OrderApi, OrderBookQuery, PageQuery};
use serde_json::Value;

#[derive(Subcommand)]
pub enum OrderCommand {
    /// Place an order (signed)
    Place {
        address: String,
        /// Order object as JSON
        #[arg(long, value_name = "JSON")]
        order: String,
    },
    /// Cancel an order by sequence number (signed)
    Cancel { address: String, sequence: u64 },
    /// List open orders
    List {
        address: String,
        /// Paging as JSON: marker, limit, ledger
        #[arg(long, value_name = "JSON")]
        params: Option<String>,
    },
    /// Show the transaction that placed or cancelled an order
    Transaction { address: String, hash: String },
    /// Show the order book for a currency pair (CUR+counterparty)
    Book {
        address: String,
        base: String,
        counter: String,
        /// Query as JSON: limit
        #[arg(long, value_name = "JSON")]
        params: Option<String>,
    },
}

impl OrderCommand {
    pub async fn run(self, session: &Session) -> Result<Value> {
        let api = session.api::<OrderApi>();
        let response = match self {
            Self::Place { address, order } => {
                let order: Value = json_arg(&order, "--order")?;
                api.place_order(&address, session.signing_secret(), &order, session.validated)
                    .await?
            }
            Self::Cancel { address, sequence } => {
                api.cancel_order(&address, session.signing_secret(), sequence, session.validated)
                    .await?
            }
            Self::List { address, params: raw } => {
                let page: PageQuery = params(raw.as_deref())?;
                api.get_account_orders(&address, &page).await?
            }
            Self::Transaction { address, hash } => {
                api.get_order_transaction(&address, &hash).await?
            }
            Self::Book {
                address,
                base,
                counter,
                params: raw,
            } => {
                let query: OrderBookQuery = params(raw.as_deref())?;
                api.get_order_book(&address, &base, &counter, &query).await?
            }
        };
        Ok(response)
    }
}
