//! Global error handling for usefullm
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Global error type for usefullm operations
#[derive(Error, Debug)]
pub enum UsefullmError {
    /// Path does not exist
    #[error("Path not found: {0}")]
    NotFound(String),

    /// Path exists but a directory was required
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// Tree format name not recognised
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Path excluded by ignore rules
    #[error("Ignored by .gitignore rules: {0}")]
    Ignored(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// LLM endpoint answered with an error status
    #[error("LLM error: {0}")]
    Llm(String),

    /// Transport-level HTTP failure
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Clipboard errors
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Ignore pattern compilation errors
    #[error("Ignore pattern error: {0}")]
    Pattern(#[from] ignore::Error),
}

/// Specialized Result type for usefullm operations
pub type Result<T> = std::result::Result<T, UsefullmError>;

/// Creates a UsefullmError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::UsefullmError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

impl From<UsefullmError> for io::Error {
    fn from(err: UsefullmError) -> Self {
        match err {
            UsefullmError::Io(e) => e,
            UsefullmError::NotFound(msg) => io::Error::new(io::ErrorKind::NotFound, msg),
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_dir(is_dir: bool) -> Result<()> {
        ensure!(is_dir, NotADirectory, "{}", "src/main.rs");
        Ok(())
    }

    #[test]
    fn test_ensure_macro() {
        assert!(check_dir(true).is_ok());
        let err = check_dir(false).unwrap_err();
        assert_eq!(err.to_string(), "Not a directory: src/main.rs");
    }

    #[test]
    fn test_into_io_error_keeps_not_found_kind() {
        let err: io::Error = error!(NotFound, "missing/dir").into();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
