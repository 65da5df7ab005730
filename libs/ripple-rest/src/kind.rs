use crate::error::RippleError;
use std::fmt;
use std::str::FromStr;

/// Domain area of the Ripple REST API served by one handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Account,
    Notification,
    Order,
    Payment,
    Status,
    Trustline,
    Utility,
}

impl ComponentKind {
    /// Every member of the closed set, in canonical order.
    pub const ALL: [ComponentKind; 7] = [
        Self::Account,
        Self::Notification,
        Self::Order,
        Self::Payment,
        Self::Status,
        Self::Trustline,
        Self::Utility,
    ];

    /// Canonical identifier, used as the registry cache key and in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Notification => "notification",
            Self::Order => "order",
            Self::Payment => "payment",
            Self::Status => "status",
            Self::Trustline => "trustline",
            Self::Utility => "utility",
        }
    }

    /// Comma-separated list of canonical identifiers.
    #[must_use]
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = RippleError;

    /// Case-insensitive lookup by component name (`"Account"`, `"account"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RippleError::UnknownComponent { name: s.to_owned() })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn parses_every_member_case_insensitively() {
        for kind in ComponentKind::ALL {
            assert_eq!(kind.as_str().parse::<ComponentKind>().unwrap(), kind);
            assert_eq!(
                kind.as_str().to_uppercase().parse::<ComponentKind>().unwrap(),
                kind
            );
        }
        assert_eq!("Trustline".parse::<ComponentKind>().unwrap(), ComponentKind::Trustline);
    }

    #[test]
    fn rejects_names_outside_the_set() {
        for name in ["NotAComponent", "", "wallet", "accounts", "Ripple"] {
            let err = name.parse::<ComponentKind>().unwrap_err();
            assert!(
                matches!(err, RippleError::UnknownComponent { name: ref n } if n == name),
                "unexpected error for {name:?}: {err:?}"
            );
        }
    }

    #[test]
    fn display_matches_canonical_identifier() {
        assert_eq!(ComponentKind::Utility.to_string(), "utility");
        assert_eq!(ComponentKind::ALL.len(), 7);
    }
}
