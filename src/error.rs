// src/error.rs
use crate::handles::{Category, Handle};
use thiserror::Error;

/// Error types for the rand-registry library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RandomError {
    /// Type code outside the registered engine or distribution table
    #[error("Unknown {category} type code {code}")]
    UnknownType { category: Category, code: u16 },

    /// Argument count or shape does not match the declared parameters
    #[error("{kind} expects {expected}, got {found}")]
    ArityMismatch {
        kind: String,
        expected: String,
        found: String,
    },

    /// Invalid parameter values
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// The backing distribution refused the parameter set
    #[error("Invalid parameters for {kind}: {reason}")]
    RejectedParameters { kind: String, reason: String },

    /// Handle was never issued or has been released
    #[error("Handle {handle} does not refer to a live object")]
    HandleNotFound { handle: Handle },

    /// Handle resolves, but to an object of another category
    #[error("Handle {handle} refers to a {found}, expected a {expected}")]
    WrongCategory {
        handle: Handle,
        expected: Category,
        found: Category,
    },

    /// Invalid configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },
}

/// Result type alias for rand-registry operations
pub type RandomResult<T> = Result<T, RandomError>;

/// Validation utilities
pub mod validation {
    use super::{RandomError, RandomResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> RandomResult<()> {
        if value <= 0.0 || value.is_nan() {
            Err(RandomError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> RandomResult<()> {
        if value < 0.0 || value.is_nan() {
            Err(RandomError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is within a range
    pub fn validate_range(name: &str, value: f64, min: f64, max: f64) -> RandomResult<()> {
        if !(min..=max).contains(&value) {
            Err(RandomError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: format!("must be in range [{}, {}]", min, max),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a probability parameter
    pub fn validate_probability(name: &str, p: f64) -> RandomResult<()> {
        validate_range(name, p, 0.0, 1.0)
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> RandomResult<()> {
        if !value.is_finite() {
            Err(RandomError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a sequence is strictly increasing
    pub fn validate_increasing(name: &str, values: &[f64]) -> RandomResult<()> {
        for pair in values.windows(2) {
            if !(pair[1] > pair[0]) {
                return Err(RandomError::InvalidParameters {
                    parameter: name.to_string(),
                    value: pair[1],
                    constraint: format!(
                        "must be strictly greater than the previous value {}",
                        pair[0]
                    ),
                });
            }
        }
        Ok(())
    }
}
