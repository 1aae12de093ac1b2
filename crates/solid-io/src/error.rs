//! Error types for STL I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for STL I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while reading or writing STL files.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Invalid file content (structural parse error).
    #[error("invalid STL content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// The file ended before the declared data did.
    #[error("unexpected end of file at byte {position}")]
    UnexpectedEof {
        /// Byte offset where data ran out.
        position: u64,
    },

    /// A binary triangle count the payload cannot supply.
    #[error("invalid triangle count: expected {expected}, got {got}")]
    TriangleCountMismatch {
        /// Number of triangles the header declared.
        expected: u32,
        /// Number of complete records actually present.
        got: u32,
    },

    /// Float parsing error in an ASCII body.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}
