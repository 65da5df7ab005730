//! Domain handlers, one per [`ComponentKind`](crate::ComponentKind).
//!
//! Each handler owns a [`RequestDispatcher`](crate::RequestDispatcher) and
//! turns its operations into `(verb, path, payload)` triples. Responses are
//! returned exactly as the transport decoded them.

mod account;
mod notification;
mod order;
mod payment;
mod status;
mod trustline;
mod utility;

pub use account::AccountApi;
pub use notification::NotificationApi;
pub use order::OrderApi;
pub use payment::PaymentApi;
pub use status::StatusApi;
pub use trustline::TrustlineApi;
pub use utility::UtilityApi;

/// Implements [`ComponentApi`](crate::ComponentApi) for a handler holding a
/// `dispatcher` field.
macro_rules! component_api {
    ($api:ident, $kind:ident) => {
        impl $crate::registry::ComponentApi for $api {
            const KIND: $crate::kind::ComponentKind = $crate::kind::ComponentKind::$kind;

            fn new(dispatcher: $crate::dispatcher::RequestDispatcher) -> Self {
                Self { dispatcher }
            }

            fn dispatcher(&self) -> &$crate::dispatcher::RequestDispatcher {
                &self.dispatcher
            }

            fn wrap(api: std::sync::Arc<Self>) -> $crate::registry::Component {
                $crate::registry::Component::$kind(api)
            }

            fn extract(component: &$crate::registry::Component) -> Option<std::sync::Arc<Self>> {
                match component {
                    $crate::registry::Component::$kind(api) => Some(std::sync::Arc::clone(api)),
                    _ => None,
                }
            }
        }
    };
}

pub(crate) use component_api;
