// src/error.rs
use thiserror::Error;

use crate::core::decode::DecodeError;
use crate::core::net::NetError;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Missing UNIClubs API key. Set {0} in your environment.")]
    MissingApiKey(&'static str),

    #[error(transparent)]
    Net(#[from] NetError),

    #[error("Upstream responded with {status} {reason}{detail}")]
    Status {
        status: u16,
        reason: String,
        /// Already prefixed with ": " when non-empty.
        detail: String,
    },

    #[error("API responded with success=false ({0})")]
    Api(String),

    #[error("Malformed upstream payload: {0}")]
    Payload(String),

    #[error("Could not find a \"{0}\" array in the page")]
    BlobNotFound(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Network failures and non-4xx statuses are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Net(_) => true,
            FetchError::Status { status, .. } => !(400..500).contains(status),
            _ => false,
        }
    }
}
