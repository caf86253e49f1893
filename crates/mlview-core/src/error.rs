//! Error types for mlview-core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MlviewError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{url} returned HTTP {status}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl MlviewError {
    /// HTTP status for [`MlviewError::Status`], `None` for everything else.
    pub fn status(&self) -> Option<u16> {
        match self {
            MlviewError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MlviewError>;
