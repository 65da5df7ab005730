use crate::api::component_api;
use crate::dispatcher::RequestDispatcher;
use crate::error::Result;
use crate::request::Payload;
use serde_json::Value;

/// Notifications about transactions affecting an account.
#[derive(Debug)]
pub struct NotificationApi {
    dispatcher: RequestDispatcher,
}

component_api!(NotificationApi, Notification);

impl NotificationApi {
    /// Notification for transaction `id` (hash or client resource id) on `address`.
    ///
    /// # Errors
    /// Propagates transport failures.
    pub async fn check_notifications(&self, address: &str, id: &str) -> Result<Value> {
        self.dispatcher
            .issue(
                "GET",
                &format!("accounts/{address}/notifications/{id}"),
                Payload::new(),
            )
            .await
    }
}
