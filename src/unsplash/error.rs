//! Error taxonomy for photo searches.

use crate::models::InvalidValue;

/// Why a photo search failed.
///
/// Every variant is produced at the point of failure inside the search call
/// and handed back unchanged; adapters only translate it to their transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Bad query or enum value; retrying without changing input is pointless
    #[error("{0}")]
    InvalidArgument(String),

    /// No access key configured
    #[error("missing UNSPLASH_ACCESS_KEY environment variable")]
    MissingCredential,

    /// Deadline elapsed or the call was cancelled
    #[error("request to Unsplash timed out")]
    Timeout,

    /// Transport failure other than a timeout
    #[error("request to Unsplash failed: {0}")]
    UpstreamUnreachable(String),

    /// Unsplash answered with a non-2xx status
    #[error("Unsplash API error ({status}): {message}")]
    UpstreamError { status: u16, message: String },

    /// 2xx response whose body was not the expected JSON
    #[error("failed to decode Unsplash response: {0}")]
    DecodeError(String),
}

impl SearchError {
    /// Upstream HTTP status, if the failure came from one
    pub fn status(&self) -> Option<u16> {
        match self {
            SearchError::UpstreamError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether repeating the same call could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            SearchError::Timeout | SearchError::UpstreamUnreachable(_) => true,
            SearchError::UpstreamError { status, .. } => *status == 429 || *status >= 500,
            SearchError::InvalidArgument(_)
            | SearchError::MissingCredential
            | SearchError::DecodeError(_) => false,
        }
    }
}

impl From<InvalidValue> for SearchError {
    fn from(err: InvalidValue) -> Self {
        SearchError::InvalidArgument(err.to_string())
    }
}
