use crate::api::component_api;
use crate::dispatcher::{RequestDispatcher, merge_secret, to_payload, with_validated};
use crate::error::Result;
use crate::models::{PaymentHistoryQuery, PaymentSubmission, PreparePaymentQuery};
use crate::request::Payload;
use serde_json::Value;

/// Payment path finding, submission and history.
#[derive(Debug)]
pub struct PaymentApi {
    dispatcher: RequestDispatcher,
}

component_api!(PaymentApi, Payment);

impl PaymentApi {
    /// Quotes for paying `amount` (URL-formatted, e.g. `1+USD+rIssuer`) from `from` to `to`.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn prepare_payment(
        &self,
        from: &str,
        to: &str,
        amount: &str,
        query: &PreparePaymentQuery,
    ) -> Result<Value> {
        self.dispatcher
            .issue(
                "GET",
                &format!("accounts/{from}/payments/paths/{to}/{amount}"),
                to_payload(query)?,
            )
            .await
    }

    /// Submit a payment. The submission fields form the top level of the
    /// body, next to the secret.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn submit_payment(
        &self,
        address: &str,
        secret: Option<&str>,
        submission: &PaymentSubmission,
        validated: bool,
    ) -> Result<Value> {
        let path = with_validated(&format!("accounts/{address}/payments"), validated);
        let payload = merge_secret(to_payload(submission)?, secret);
        self.dispatcher.issue("POST", &path, payload).await
    }

    /// State of payment `id` (client resource id or transaction hash).
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn confirm_payment(&self, address: &str, id: &str) -> Result<Value> {
        self.dispatcher
            .issue("GET", &format!("/accounts/{address}/payments/{id}"), Payload::new())
            .await
    }

    /// # Errors
    /// Propagates transport failures.
    pub async fn get_payment_history(
        &self,
        address: &str,
        query: &PaymentHistoryQuery,
    ) -> Result<Value> {
        self.dispatcher
            .issue("GET", &format!("/accounts/{address}/payments"), to_payload(query)?)
            .await
    }
}
