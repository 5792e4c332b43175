//! Error types for reading line listings.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CondenseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line} is not valid UTF-8")]
    InvalidUtf8 { line: usize },
}

/// Result type for reading line listings
pub type Result<T> = std::result::Result<T, CondenseError>;
