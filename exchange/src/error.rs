use std::time::Duration;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong between sending a request and holding a decoded record.
///
/// The single-item operations return these to the caller. The batch operations log them
/// and drop the affected item.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, reset).
    #[error("request to {uri} failed: {source}")]
    Network {
        uri: String,
        #[source]
        source: BoxError,
    },

    /// The server answered with a non-success status.
    #[error("request to {uri} returned HTTP {status}")]
    Status { uri: String, status: u16 },

    /// The response started but its body could not be read to the end.
    #[error("failed to read response body from {uri}: {source}")]
    Read {
        uri: String,
        #[source]
        source: BoxError,
    },

    /// The payload did not match the expected record schema.
    #[error("failed to decode payload: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },

    /// The request ran past the per-request timeout.
    #[error("request to {uri} timed out after {after:?}")]
    Timeout { uri: String, after: Duration },

    /// The batch deadline expired before this target reported.
    #[error("batch deadline expired before {uri} completed")]
    DeadlineExceeded { uri: String },

    /// The fetch for this target panicked before producing a result.
    #[error("fetch of {uri} panicked before completing")]
    Abandoned { uri: String },
}

/// Flat discriminant of [`FetchError`], handy for logging and matching in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    Network,
    Status,
    Read,
    Decode,
    Timeout,
    DeadlineExceeded,
    Abandoned,
}

impl FetchError {
    pub(crate) fn network(uri: &str, source: impl Into<BoxError>) -> Self {
        Self::Network {
            uri: uri.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn read(uri: &str, source: impl Into<BoxError>) -> Self {
        Self::Read {
            uri: uri.to_string(),
            source: source.into(),
        }
    }

    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Network { .. } => FetchErrorKind::Network,
            Self::Status { .. } => FetchErrorKind::Status,
            Self::Read { .. } => FetchErrorKind::Read,
            Self::Decode { .. } => FetchErrorKind::Decode,
            Self::Timeout { .. } => FetchErrorKind::Timeout,
            Self::DeadlineExceeded { .. } => FetchErrorKind::DeadlineExceeded,
            Self::Abandoned { .. } => FetchErrorKind::Abandoned,
        }
    }
}
