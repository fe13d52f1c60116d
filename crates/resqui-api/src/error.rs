//! API error type.

use thiserror::Error;

/// Any way a dashboard request can fail.
///
/// Callers in the state layer treat all variants alike; the distinction is
/// kept for logging.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid base URL {url}: {reason}")]
    Url { url: String, reason: String },
    #[error("Request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Unexpected status {status} from {path}")]
    Status { status: u16, path: String },
    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// A non-success HTTP status.
    pub fn status(status: u16, path: impl Into<String>) -> Self {
        Self::Status {
            status,
            path: path.into(),
        }
    }
}
