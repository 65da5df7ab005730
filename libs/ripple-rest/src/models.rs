//! Typed query parameters and request bodies.
//!
//! Unset optional fields are omitted from the wire format entirely.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Maximum results per response: a count or `all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Count(u32),
    All,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::All => f.write_str("all"),
        }
    }
}

impl FromStr for Limit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<u32>()
            .map(Self::Count)
            .map_err(|_| format!("invalid limit '{s}': expected a number or 'all'"))
    }
}

impl Serialize for Limit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Count(n) => serializer.serialize_u32(*n),
            Self::All => serializer.serialize_str("all"),
        }
    }
}

impl<'de> Deserialize<'de> for Limit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(n) => Ok(Self::Count(n)),
            Raw::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }
}

/// Filters for balance and trustline listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerFilter {
    /// ISO 4217 currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Issuing or counterparty address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    /// Server-provided pagination marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Limit>,
    /// Ledger hash, sequence, or `validated` / `current` / `closed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger: Option<String>,
}

/// Paging for account order listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Limit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderBookQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Limit>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreparePaymentQuery {
    /// Comma-separated source currencies, each `CUR` or `CUR+counterparty`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_currencies: Option<String>,
}

/// Payment direction relative to the queried account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Incoming,
    Outgoing,
}

/// Filters and paging for payment history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentHistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_failed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earliest_first: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_ledger: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_ledger: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_per_page: Option<u32>,
    /// 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Account settings update; omitted fields are left unchanged on the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountSettings {
    /// Quoted decimal between 1 and 2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_destination_tag: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_authorization: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disallow_xrp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_master: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_freeze: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_freeze: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_ripple: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_hash: Option<String>,
    /// secp256k1 public key, hex.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_key: Option<String>,
    /// Lowercase ASCII domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// Body of a payment submission.
///
/// `payment` is passed through untouched; it is usually taken from a
/// prepare-payment response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentSubmission {
    pub payment: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_ledger_sequence: Option<String>,
    /// Decimal XRP amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee: Option<String>,
    /// Decimal XRP amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_fee: Option<String>,
}

impl PaymentSubmission {
    #[must_use]
    pub fn new(payment: Value) -> Self {
        Self {
            payment,
            client_resource_id: None,
            last_ledger_sequence: None,
            max_fee: None,
            fixed_fee: None,
        }
    }

    #[must_use]
    pub fn with_client_resource_id(mut self, id: impl Into<String>) -> Self {
        self.client_resource_id = Some(id.into());
        self
    }
}

/// Trustline to create or modify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrustlineGrant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    pub counterparty: String,
    pub currency: String,
    /// Quoted decimal.
    pub limit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_allows_rippling: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_trustline_frozen: Option<bool>,
}
