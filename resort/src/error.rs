//! Error types for the resort library.
//!
//! This module provides the error hierarchy for all booking and content
//! operations, using `thiserror` for ergonomic error handling.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::booking::BookingKind;

/// Result type alias for operations that may fail with a resort error.
///
/// # Examples
///
/// ```
/// use resort::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(1)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// A single field-level validation message.
///
/// # Examples
///
/// ```
/// use resort::FieldError;
///
/// let err = FieldError::new("guests", "At least 1 guest is required.");
/// assert_eq!(err.to_string(), "guests: At least 1 guest is required.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the failure.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
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

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The main error type for the resort library.
#[derive(Debug, Error)]
pub enum Error {
    /// A request failed validation. Carries every field-level message.
    #[error("validation failed: {}", join_field_errors(.errors))]
    ValidationFailed {
        /// The individual field failures, sorted by field name.
        errors: Vec<FieldError>,
    },

    /// A single configuration or input value was invalid.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested record does not exist or is in the wrong state.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A stored booking code could not be parsed.
    ///
    /// The allocator refuses to guess a number in this case, since guessing
    /// could hand out a code that is already assigned.
    #[error("malformed {kind} booking sequence at '{code}': {reason}")]
    MalformedSequenceState {
        /// The booking kind whose sequence is malformed.
        kind: BookingKind,
        /// The offending stored code.
        code: String,
        /// Why the code could not be parsed.
        reason: String,
    },

    /// The ten-digit sequence for a booking kind is used up.
    #[error("{kind} booking sequence exhausted")]
    SequenceExhausted {
        /// The booking kind whose sequence ran out.
        kind: BookingKind,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl Error {
    /// Builds a `ValidationFailed` error, sorting the messages by field.
    #[must_use]
    pub fn validation_failed(mut errors: Vec<FieldError>) -> Self {
        errors.sort();
        Self::ValidationFailed { errors }
    }

    /// Builds a `NotFound` error for the given resource description.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Check if error indicates a missing record.
    ///
    /// # Examples
    ///
    /// ```
    /// use resort::Error;
    ///
    /// let err = Error::not_found("gallery image 7");
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error is a validation failure of either flavour.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationFailed { .. } | Self::Validation { .. })
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::validation_failed(crate::booking::validation::field_errors(&errors))
    }
}
