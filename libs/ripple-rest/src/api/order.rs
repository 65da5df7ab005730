use crate::api::component_api;
use crate::dispatcher::{RequestDispatcher, merge_secret, to_payload, with_validated, wrap_under};
use crate::error::Result;
use crate::models::{OrderBookQuery, PageQuery};
use crate::request::Payload;
use serde_json::Value;

/// Currency-exchange orders and order books.
#[derive(Debug)]
pub struct OrderApi {
    dispatcher: RequestDispatcher,
}

component_api!(OrderApi, Order);

impl OrderApi {
    /// Place an order; `order` is sent as given under the `order` key.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn place_order(
        &self,
        address: &str,
        secret: Option<&str>,
        order: &Value,
        validated: bool,
    ) -> Result<Value> {
        let path = with_validated(&format!("accounts/{address}/orders"), validated);
        let payload = merge_secret(wrap_under("order", order)?, secret);
        self.dispatcher.issue("POST", &path, payload).await
    }

    /// Cancel the order with sequence number `sequence`.
    ///
    /// The body carries only the secret; without one it is `{}`.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn cancel_order(
        &self,
        address: &str,
        secret: Option<&str>,
        sequence: u64,
        validated: bool,
    ) -> Result<Value> {
        let path = with_validated(&format!("accounts/{address}/orders/{sequence}"), validated);
        self.dispatcher
            .issue("DELETE", &path, merge_secret(Payload::new(), secret))
            .await
    }

    /// Open orders of `address`.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn get_account_orders(&self, address: &str, page: &PageQuery) -> Result<Value> {
        self.dispatcher
            .issue("GET", &format!("accounts/{address}/orders"), to_payload(page)?)
            .await
    }

    /// Details of the transaction that placed or cancelled an order.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn get_order_transaction(&self, address: &str, hash: &str) -> Result<Value> {
        self.dispatcher
            .issue("GET", &format!("accounts/{address}/orders/{hash}"), Payload::new())
            .await
    }

    /// Top of the order book for `base`/`counter`, each `CUR+counterparty`.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn get_order_book(
        &self,
        address: &str,
        base: &str,
        counter: &str,
        query: &OrderBookQuery,
    ) -> Result<Value> {
        self.dispatcher
            .issue(
                "GET",
                &format!("accounts/{address}/order_book/{base}/{counter}"),
                to_payload(query)?,
            )
            .await
    }
}
