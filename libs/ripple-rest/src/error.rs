use ripple_http::HttpError;

/// Errors produced by the dispatch layer.
///
/// Transport failures are wrapped without translation; inspect the inner
/// [`HttpError`] for status codes and network errors.
#[derive(Debug, thiserror::Error)]
pub enum RippleError {
    #[error("unknown component '{name}'; expected one of {}", crate::kind::ComponentKind::names())]
    UnknownComponent { name: String },

    #[error("bad REST method '{method}'; expected one of GET, POST, PUT, DELETE")]
    UnsupportedMethod { method: String },

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Transport(#[from] HttpError),
}

impl RippleError {
    /// True when the error originated in the transport rather than in request shaping.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, RippleError>;
