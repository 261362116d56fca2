//! Error handling for dumpkit-store
//!
//! Wraps dumpkit-core ExError with store-specific helpers

use dumpkit_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a job validation error
pub fn job_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidJob)
        .with_op("job_parse")
        .with_message(reason.to_string())
}

/// Create an IO error for a file operation
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path)
        .with_message(err.to_string())
}

/// Create a serialization error
pub fn serialization_error(operation: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
