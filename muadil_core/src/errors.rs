//! # Error Types
//!
//! Structured error types for muadil_core. Three of the variants describe
//! conditions the core degrades around instead of failing on:
//!
//! - [`CalcError::UndefinedGeometry`] - a row's dimensions do not describe a
//!   valid shape; the row is left out of the catalog and the searches.
//! - [`CalcError::InvalidSearchInput`] - a search target or range is unusable;
//!   the search returns an empty list.
//! - [`CalcError::MissingResource`] - a reference illustration is absent; it
//!   is simply not shown.
//!
//! ## Example
//!
//! ```rust
//! use muadil_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_mm: f64) -> CalcResult<()> {
//!     if length_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "length_mm",
//!             length_mm.to_string(),
//!             "Length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_length(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for muadil_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for section and search operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Dimensions are missing, non-positive, or produce a non-positive
    /// derived quantity (inner diameter, net web height, ...)
    #[error("Undefined geometry for {family}: {reason}")]
    UndefinedGeometry { family: String, reason: String },

    /// A search target, height, or thickness range is unusable
    #[error("Invalid search input for '{field}': {value} - {reason}")]
    InvalidSearchInput {
        field: String,
        value: String,
        reason: String,
    },

    /// An optional resource (reference illustration) is not available
    #[error("Missing resource: {resource} - {reason}")]
    MissingResource { resource: String, reason: String },

    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Profile not found in the catalog
    #[error("Profile not found: {family} '{name}'")]
    ProfileNotFound { family: String, name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an UndefinedGeometry error
    pub fn undefined_geometry(family: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::UndefinedGeometry {
            family: family.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidSearchInput error
    pub fn invalid_search_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidSearchInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingResource error
    pub fn missing_resource(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::MissingResource {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ProfileNotFound error
    pub fn profile_not_found(family: impl Into<String>, name: impl Into<String>) -> Self {
        CalcError::ProfileNotFound {
            family: family.into(),
            name: name.into(),
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

    /// Errors the core degrades around (excluded row, empty list, no picture)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CalcError::UndefinedGeometry { .. }
                | CalcError::InvalidSearchInput { .. }
                | CalcError::MissingResource { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::UndefinedGeometry { .. } => "UNDEFINED_GEOMETRY",
            CalcError::InvalidSearchInput { .. } => "INVALID_SEARCH_INPUT",
            CalcError::MissingResource { .. } => "MISSING_RESOURCE",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::ProfileNotFound { .. } => "PROFILE_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}

impl From<toml::de::Error> for CalcError {
    fn from(e: toml::de::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}
