use super::{Session, json_arg, params};
use anyhow::Result;
use clap::Subcommand;
use ripple_rest::{PaymentApi, PaymentHistoryQuery, PaymentSubmission, PreparePaymentQuery};
use serde_json::Value;

#[derive(Subcommand)]
pub enum PaymentCommand {
    /// Find payment paths
    Prepare {
        from: String,
        to: String,
        /// URL-formatted amount, e.g. 1+USD+rIssuer
        amount: String,
        /// Query as JSON: `source_currencies`
        #[arg(long, value_name = "JSON")]
        params: Option<String>,
    },
    /// Submit a payment (signed)
    Submit {
        address: String,
        /// Submission as JSON: `payment`, `client_resource_id`, `max_fee`, ...
        #[arg(long, value_name = "JSON")]
        submission: String,
    },
    /// Show the state of a payment
    Confirm { address: String, id: String },
    /// List payments affecting an account
    History {
        address: String,
        /// Filter as JSON: `direction`, `exclude_failed`, `page`, ...
        #[arg(long, value_name = "JSON")]
        params: Option<String>,
    },
}

impl PaymentCommand {
    pub async fn run(self, session: &Session) -> Result<Value> {
        let api = session.api::<PaymentApi>();
        let response = match self {
            Self::Prepare {
                from,
                to,
                amount,
                params: raw,
            } => {
                let query: PreparePaymentQuery = params(raw.as_deref())?;
                api.prepare_payment(&from, &to, &amount, &query).await?
            }
            Self::Submit {
                address,
                submission,
            } => {
                let submission: PaymentSubmission = json_arg(&submission, "--submission")?;
                api.submit_payment(
                    &address,
                    session.signing_secret(),
                    &submission,
                    session.validated,
                )
                .await?
            }
            Self::Confirm { address, id } => api.confirm_payment(&address, &id).await?,
            Self::History { address, params: raw } => {
                let query: PaymentHistoryQuery = params(raw.as_deref())?;
                api.get_payment_history(&address, &query).await?
            }
        };
        Ok(response)
    }
}
