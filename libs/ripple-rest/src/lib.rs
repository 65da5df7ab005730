#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Client-side dispatch layer for the Ripple REST API.
//!
//! A [`ComponentRegistry`] hands out one handler per [`ComponentKind`]
//! (account, payment, order, ...). Handlers turn each catalog operation into
//! a [`RequestSpec`] (verb, absolute URL, payload) through a shared
//! [`RequestDispatcher`] and pass it to a [`Transport`]. Responses come back
//! as the decoded JSON the server sent; nothing is interpreted or retried
//! here.
//!
//! # Example
//!
//! ```ignore
//! use ripple_rest::{ComponentRegistry, PaymentApi, PaymentSubmission, RippleClientConfig};
//!
//! let config = RippleClientConfig {
//!     server_url: "https://rest.example.com/v1".to_owned(),
//!     ..RippleClientConfig::default()
//! };
//! let registry = ComponentRegistry::from_config(&config)?;
//! let payments = registry.api::<PaymentApi>(&config.server_url);
//!
//! let result = payments
//!     .submit_payment("rABC", Some("sSECRET"), &PaymentSubmission::new(payment), true)
//!     .await?;
//! ```

pub mod api;
mod config;
mod dispatcher;
mod error;
mod kind;
pub mod models;
mod registry;
mod request;
mod transport;
mod verb;


pub use api::{
    AccountApi, NotificationApi, OrderApi, PaymentApi, StatusApi, TrustlineApi, UtilityApi,
};
pub use config::{RippleClientConfig, TlsRoots};
pub use dispatcher::{RequestDispatcher, format_flag, merge_secret, to_payload};
pub use error::{Result, RippleError};
pub use kind::ComponentKind;
pub use models::{
    AccountSettings, Direction, LedgerFilter, Limit, OrderBookQuery, PageQuery,
    PaymentHistoryQuery, PaymentSubmission, PreparePaymentQuery, TrustlineGrant,
};
pub use registry::{Component, ComponentApi, ComponentRegistry};
pub use request::{CallOptions, ContentType, DEFAULT_USER_AGENT, Payload, RequestSpec};
pub use transport::{HttpTransport, Transport};
pub use verb::{Verb, resolve_verb};

pub use ripple_http::HttpError;
