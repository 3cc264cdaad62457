//! Error types for binsave
//!
//! Two layers of errors:
//! - [`CodecError`] for a single value failing to convert to/from bytes
//! - [`StoreError`] for everything that happens at the store boundary

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error produced by a value codec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input is shorter than the fixed width of the decoded type
    #[error("Input too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    /// Bytes are not valid in the codec's text encoding
    #[error("Invalid {encoding} text: {reason}")]
    InvalidText {
        encoding: &'static str,
        reason: String,
    },

    /// A serde-backed codec failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Unified error type for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // File Format Errors
    // -------------------------------------------------------------------------
    #[error("Header mismatch: expected {expected:02x?}, found {found:02x?}")]
    HeaderMismatch {
        expected: [u8; 4],
        found: Vec<u8>,
    },

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Short variant name, used as the tag in log sink messages
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Io(_) => "Io",
            StoreError::HeaderMismatch { .. } => "HeaderMismatch",
            StoreError::Codec(_) => "Codec",
            StoreError::Config(_) => "Config",
        }
    }
}
