use shared::error::ServiceException;
use thiserror::Error;

/// Why a single search attempt failed. Every variant is handled the same way
/// by the controller; the split only feeds diagnostics.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("scoring service unreachable: {0}")]
    Transport(String),
    #[error("scoring service request timed out after {0}s")]
    Timeout(u64),
    #[error(transparent)]
    Service(#[from] ServiceException),
    #[error("malformed scoring service response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFailureKind {
    Transport,
    Service,
    MalformedResponse,
}

impl QueryError {
    pub fn kind(&self) -> QueryFailureKind {
        match self {
            Self::Transport(_) | Self::Timeout(_) => QueryFailureKind::Transport,
            Self::Service(_) => QueryFailureKind::Service,
            Self::MalformedResponse(_) => QueryFailureKind::MalformedResponse,
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_secs: Option<u64>) -> Self {
        if err.is_timeout() {
            return Self::Timeout(timeout_secs.unwrap_or_default());
        }
        if err.is_decode() {
            return Self::MalformedResponse(err.to_string());
        }
        Self::Transport(err.to_string())
    }
}
