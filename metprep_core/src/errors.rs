//! # Error Types
//!
//! Structured error types for metprep_core. Every calculator error carries
//! the exact sentence shown to the user, so a front end can print
//! [`CalcError::user_message`] without rewording it.
//!
//! ## Example
//!
//! ```rust
//! use metprep_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_mm: f64) -> CalcResult<()> {
//!     if length_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "length_mm",
//!             length_mm.to_string(),
//!             "Sample dimensions must be greater than 0",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_length(-1.0).unwrap_err();
//! assert_eq!(err.user_message(), "Sample dimensions must be greater than 0");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::ResultLine;

/// Result type alias for metprep_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is outside its allowed domain (non-positive, NaN, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A computed quantity left its valid range (e.g. ASTM G outside 0-14)
    #[error("Out of range: {quantity} = {value} - {reason}")]
    OutOfRange {
        quantity: String,
        value: String,
        reason: String,
    },

    /// No row in a lookup table matches the key
    #[error("Not found in {table}: {key}")]
    NotFound { table: String, key: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Worksheet file written by an incompatible version
    #[error("Version mismatch: file is v{file_version}, expected v{expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an OutOfRange error
    pub fn out_of_range(quantity: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::OutOfRange {
            quantity: quantity.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(table: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::NotFound {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// The sentence presented to the user.
    ///
    /// For input and range errors this is the literal message of the
    /// calculator; other variants fall back to the `Display` form.
    pub fn user_message(&self) -> String {
        match self {
            CalcError::InvalidInput { reason, .. } | CalcError::OutOfRange { reason, .. } => {
                reason.clone()
            }
            CalcError::NotFound { .. } => "Not found".to_string(),
            other => other.to_string(),
        }
    }

    /// The single display line that replaces all numeric output on failure
    pub fn to_result_line(&self) -> ResultLine {
        ResultLine::new("Error", self.user_message())
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::OutOfRange { .. } => "OUT_OF_RANGE",
            CalcError::NotFound { .. } => "NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}
