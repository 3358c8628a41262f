//! Error types for relay operations.

use thiserror::Error;

/// Errors that can occur when handing an event to relays.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Connection to relay failed.
    #[error("Failed to connect to relay {url}: {reason}")]
    Connection {
        /// The relay URL that failed.
        url: String,
        /// The reason for the failure.
        reason: String,
    },

    /// Sending the message failed after connecting.
    #[error("Failed to send to relay {url}: {reason}")]
    Send {
        /// The relay URL that failed.
        url: String,
        /// The reason for the failure.
        reason: String,
    },

    /// Invalid relay URL.
    #[error("Invalid relay URL: {0}")]
    InvalidUrl(String),

    /// The event could not be framed for sending.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;
