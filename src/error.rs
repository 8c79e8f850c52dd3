use thiserror::Error;

/// Errors from a single call to the upstream media-hosting API.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-success status
    #[error("Upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Requested folder or listing does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body could not be decoded
    #[error("Failed to decode upstream response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            UpstreamError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            UpstreamError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            UpstreamError::Connection(err.to_string())
        }
    }
}

/// Faults that abort a whole aggregation.
///
/// Per-folder listing and fetch failures never produce one of these; they are
/// recorded as [`Fault`](crate::gallery::Fault)s on a degraded result instead.
#[derive(Debug, Clone, Error)]
pub enum GalleryError {
    /// The aggregation task panicked or was cancelled
    #[error("Aggregation aborted: {0}")]
    Aborted(String),
}
