//! Error handling for tariffwatch-store
//!
//! Wraps tariffwatch-core ExError with store-specific helpers

use std::path::Path;
use tariffwatch_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error that names the path involved
pub fn io_error_at(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(format!("{}: {}", path.display(), err))
}

/// Create a configuration error
pub fn config_error(reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("load_config")
        .with_message(reason)
}

/// Create an export read/parse error
pub fn export_error(operation: &str, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Export)
        .with_op(operation.to_string())
        .with_message(reason)
}

/// Create an error from csv::Error
pub fn from_csv(operation: &str, err: csv::Error) -> ExError {
    let position = err
        .position()
        .map(|p| format!(" (line {})", p.line()))
        .unwrap_or_default();
    export_error(operation, format!("{}{}", err, position))
}

/// Create a serialization error
pub fn serialization_error(operation: &str, err: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a not-found error
pub fn not_found(operation: &str, what: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op(operation.to_string())
        .with_message(what)
}
