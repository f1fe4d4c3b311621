//! Error types for digital-twin-core.
//!
//! This module defines the central error type [`TwinError`] used throughout
//! the crate, along with the [`TwinResult<T>`] type alias.
//!
//! # Examples
//!
//! ```rust
//! use digital_twin_core::types::NeurotransmitterInput;
//! use digital_twin_core::{NeurotransmitterState, TwinError};
//!
//! let result = NeurotransmitterState::new(NeurotransmitterInput {
//!     serotonin: 1.5,
//!     ..Default::default()
//! });
//!
//! match result {
//!     Err(TwinError::OutOfRange { field, .. }) => assert_eq!(field, "serotonin"),
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

use thiserror::Error;

use crate::types::ValueRange;

/// Top-level error type for digital twin operations.
///
/// Error messages carry the field or metric name and, for range violations,
/// the offending scalar and its bound. They never embed free-text clinical
/// data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TwinError {
    /// A sub-state field value violated its declared bound.
    ///
    /// # When This Occurs
    ///
    /// - Constructing a sub-state with a value outside its range
    /// - Deserializing a payload with an out-of-range value
    /// - NaN or Infinity supplied for a bounded field
    #[error("Value out of range for '{field}': {value} not in {range}")]
    OutOfRange {
        /// Name of the offending field
        field: String,
        /// Value that was supplied
        value: f32,
        /// Inclusive bound the field must respect
        range: ValueRange,
    },

    /// A named-field input referenced a field the sub-state does not have.
    #[error("Unknown field: '{field}'")]
    UnknownField {
        /// The unrecognised field name
        field: String,
    },

    /// A derived metric could not be evaluated.
    ///
    /// # When This Occurs
    ///
    /// - Scoring weights that produce NaN or Infinity
    /// - A score escaping `[0.0, 1.0]`
    ///
    /// Validated inputs and validated weights never produce this error; it
    /// signals a defect rather than bad user input.
    #[error("Calculation error in {metric}: {message}")]
    Calculation {
        /// Name of the metric being computed
        metric: String,
        /// Description of the failure
        message: String,
    },

    /// The model version is not a semantic version.
    #[error("Invalid model version '{version}': expected MAJOR.MINOR.PATCH")]
    InvalidVersion {
        /// The rejected version string
        version: String,
    },

    /// Configuration is invalid or could not be loaded.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A flat record entry had the wrong kind or an unparseable value.
    #[error("Invalid record entry '{key}': {message}")]
    InvalidRecord {
        /// Key of the offending entry
        key: String,
        /// Description of what was expected
        message: String,
    },
}

impl TwinError {
    /// Create an out-of-range error for `field`.
    pub fn out_of_range(field: impl Into<String>, value: f32, range: ValueRange) -> Self {
        Self::OutOfRange {
            field: field.into(),
            value,
            range,
        }
    }

    /// Create a calculation error for `metric`.
    pub fn calculation(metric: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Calculation {
            metric: metric.into(),
            message: message.into(),
        }
    }

    /// Check if the caller can recover by correcting its input.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::OutOfRange { .. }
                | Self::UnknownField { .. }
                | Self::InvalidVersion { .. }
                | Self::InvalidRecord { .. }
        )
    }

    /// Check if this error indicates a programming defect.
    #[inline]
    pub fn is_defect(&self) -> bool {
        matches!(self, Self::Calculation { .. })
    }

    /// Name of the field this error is about, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::OutOfRange { field, .. } | Self::UnknownField { field } => Some(field),
            Self::InvalidRecord { key, .. } => Some(key),
            Self::InvalidVersion { .. } => Some("version"),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TwinError {
    fn from(err: serde_json::Error) -> Self {
        TwinError::SerializationError(err.to_string())
    }
}

impl From<config::ConfigError> for TwinError {
    fn from(err: config::ConfigError) -> Self {
        TwinError::ConfigError(err.to_string())
    }
}

/// Result type alias for digital twin operations.
pub type TwinResult<T> = Result<T, TwinError>;
