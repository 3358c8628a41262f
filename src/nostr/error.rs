//! Error types for Nostr identity operations.

use thiserror::Error;

/// Errors that can occur while encoding, decoding, hashing or signing.
#[derive(Error, Debug)]
pub enum NostrError {
    /// Bech32 string is malformed (charset, case, length or checksum).
    #[error("Malformed bech32: {0}")]
    MalformedBech32(String),

    /// A TLV record runs past the end of the buffer.
    #[error("Truncated TLV record at offset {offset}")]
    TruncatedTlv {
        /// Offset of the record that could not be read.
        offset: usize,
    },

    /// A TLV value is too long for the single-byte length field.
    #[error("TLV value of type {tlv_type} is {len} bytes (max 255)")]
    TlvValueTooLong {
        /// The TLV type byte.
        tlv_type: u8,
        /// The rejected value length.
        len: usize,
    },

    /// A fixed-length field has the wrong size.
    #[error("Invalid length for {field}: expected {expected} bytes, got {actual}")]
    InvalidFieldLength {
        /// Name of the field.
        field: &'static str,
        /// Required length in bytes.
        expected: usize,
        /// Length that was found.
        actual: usize,
    },

    /// A required TLV field is absent.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The human-readable prefix is not a known NIP-19 entity.
    #[error("Unknown entity prefix: {0}")]
    UnknownEntityPrefix(String),

    /// A relay hint is not valid UTF-8.
    #[error("Relay hint is not valid UTF-8")]
    InvalidUtf8,

    /// The secret key does not belong to the event's pubkey.
    #[error("Key mismatch: event pubkey is {expected}, secret key derives {actual}")]
    KeyMismatch {
        /// Pubkey claimed by the event.
        expected: String,
        /// Pubkey derived from the secret key.
        actual: String,
    },

    /// Key derivation failed.
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// Hex encoding/decoding error.
    #[error("Hex encoding error: {0}")]
    HexError(String),

    /// Serialization failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid event structure or content.
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// Event signature verification failed.
    #[error("Invalid event signature")]
    InvalidSignature,
}

/// Result type for Nostr operations.
pub type Result<T> = std::result::Result<T, NostrError>;

impl From<hex::FromHexError> for NostrError {
    fn from(e: hex::FromHexError) -> Self {
        Self::HexError(e.to_string())
    }
}
