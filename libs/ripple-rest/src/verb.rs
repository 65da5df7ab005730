use crate::error::RippleError;
use std::fmt;

/// HTTP verbs the dispatch layer accepts.
///
/// `Put` is accepted for completeness; no catalog operation issues it today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether the payload travels in the query string rather than the body.
    #[must_use]
    pub const fn uses_query(self) -> bool {
        matches!(self, Self::Get)
    }
}

/// Map a literal verb token to a [`Verb`].
///
/// Matching is exact: `"get"` and `"PATCH"` are both rejected.
///
/// # Errors
/// Returns [`RippleError::UnsupportedMethod`] for any token other than
/// `GET`, `POST`, `PUT` or `DELETE`.
pub fn resolve_verb(token: &str) -> Result<Verb, RippleError> {
    match token {
        "GET" => Ok(Verb::Get),
        "POST" => Ok(Verb::Post),
        "PUT" => Ok(Verb::Put),
        "DELETE" => Ok(Verb::Delete),
        other => Err(RippleError::UnsupportedMethod {
            method: other.to_owned(),
        }),
    }
}

impl From<Verb> for http::Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::Get => http::Method::GET,
            Verb::Post => http::Method::POST,
            Verb::Put => http::Method::PUT,
            Verb::Delete => http::Method::DELETE,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
