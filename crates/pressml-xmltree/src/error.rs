//! Error types for XML tree serialization.

use thiserror::Error;

/// Errors that can occur when serializing a document tree.
#[derive(Debug, Error)]
pub enum Error {
    /// XML writing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// UTF-8 encoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for XML tree operations.
pub type Result<T> = std::result::Result<T, Error>;
