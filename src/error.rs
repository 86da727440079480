//! Global error handling for codedump
//!
//! Only failures that make the whole run meaningless end up here: an
//! unusable configuration or an output sink that cannot be created or
//! written. Per-file and per-directory problems are recorded in the report
//! itself and never reach this type.

use std::io;
use thiserror::Error;

/// Global error type for codedump operations
#[derive(Error, Debug)]
pub enum CodeDumpError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(String),
}

/// Specialized Result type for codedump operations
pub type Result<T> = std::result::Result<T, CodeDumpError>;

/// Creates a CodeDumpError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::CodeDumpError::$error_type(format!($($arg)*))
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

// Lets `main` keep an io::Result signature
impl From<CodeDumpError> for io::Error {
    fn from(err: CodeDumpError) -> Self {
        match err {
            CodeDumpError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn must_be_positive(n: i32) -> Result<i32> {
        ensure!(n > 0, Config, "expected a positive number, got {}", n);
        Ok(n)
    }

    #[test]
    fn ensure_builds_formatted_variant() {
        assert_eq!(must_be_positive(3).unwrap(), 3);

        let err = must_be_positive(-1).unwrap_err();
        assert!(matches!(err, CodeDumpError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: expected a positive number, got -1"
        );
    }

    #[test]
    fn io_errors_round_trip_to_io() {
        let original = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let wrapped: CodeDumpError = original.into();
        let back: io::Error = wrapped.into();
        assert_eq!(back.kind(), io::ErrorKind::PermissionDenied);

        let back: io::Error = error!(PathNotFound, "/missing").into();
        assert_eq!(back.kind(), io::ErrorKind::Other);
        assert!(back.to_string().contains("/missing"));
    }
}
