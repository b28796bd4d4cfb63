//! # Error Types
//!
//! Structured error types for runcal_core. Two layers exist:
//!
//! - [`ValidationErrors`] - every field-level problem found in a form,
//!   reported together so the user can fix them all at once
//! - [`CalcError`] - the error returned by library operations; validation
//!   failures are carried inside [`CalcError::ValidationFailed`]
//!
//! ## Example
//!
//! ```rust
//! use runcal_core::errors::{CalcError, CalcResult};
//!
//! fn check_weight(weight_kg: f64) -> CalcResult<()> {
//!     if !weight_kg.is_finite() || weight_kg <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "weight_kg",
//!             weight_kg.to_string(),
//!             "Weight must be a positive number",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_weight(-5.0).is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for runcal_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// A single field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field (e.g., "distance_km")
    pub field: String,
    /// Human-readable message shown next to the form
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All problems found while validating a form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem for `field`
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Messages only, as the form displays them
    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.message.as_str()).collect()
    }

    /// Check whether a given field has at least one problem
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// `Ok(value)` when nothing was recorded, otherwise the collected errors
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Structured error type for estimator operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic handling by the CLI and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// One or more form fields failed validation; nothing was calculated
    #[error("Validation failed: {errors}")]
    ValidationFailed { errors: ValidationErrors },

    /// The estimator refused its input (non-finite or out-of-domain values)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

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

    /// Settings schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
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

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
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

    /// True for errors caused by what the user typed, as opposed to I/O
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::ValidationFailed { .. }
                | CalcError::CalculationFailed { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::ValidationFailed { .. } => "VALIDATION_FAILED",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<ValidationErrors> for CalcError {
    fn from(errors: ValidationErrors) -> Self {
        CalcError::ValidationFailed { errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("weight_kg", "-5", "Weight must be a positive number");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_validation_errors_serialize_as_list() {
        let mut errors = ValidationErrors::new();
        errors.push("distance_km", "Distance must be a positive number");
        let error = CalcError::from(errors);

        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["type"], "ValidationFailed");
        assert_eq!(json["details"]["errors"][0]["field"], "distance_km");
    }

    #[test]
    fn test_validation_display_joins_messages() {
        let mut errors = ValidationErrors::new();
        errors.push("distance_km", "Distance must be a positive number");
        errors.push("speed_kmh", "Speed must be a positive number");
        assert_eq!(
            errors.to_string(),
            "Distance must be a positive number; Speed must be a positive number"
        );
        assert!(errors.has_field("speed_kmh"));
        assert!(!errors.has_field("age_years"));
    }

    #[test]
    fn test_into_result() {
        let empty = ValidationErrors::new();
        assert_eq!(empty.into_result(|| 7), Ok(7));

        let mut errors = ValidationErrors::new();
        errors.push("age_years", "Age must be a number between 1 and 120");
        assert!(errors.into_result(|| 7).is_err());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::calculation_failed("running", "NaN").error_code(), "CALCULATION_FAILED");
        assert_eq!(CalcError::file_error("open", "x", "y").error_code(), "FILE_ERROR");
        assert!(CalcError::calculation_failed("running", "NaN").is_input_error());
        assert!(!CalcError::file_error("open", "x", "y").is_input_error());
    }
}
