//! Error types for simdode operations.
//!
//! The stepping and extrapolation kernels themselves never fail: a zero step
//! count is a no-op and non-finite values propagate silently through the lanes.
//! Errors only appear at the edges, where callers validate batch input,
//! configure an extrapolator, or opt into checking a result for NaN/Inf lanes.

use std::fmt;

/// Errors that can occur around simdode operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OdeError {
    /// Input validation error.
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
    /// An extrapolator setting is out of range.
    ConfigError {
        /// Name of the offending setting.
        parameter: &'static str,
        /// Human-readable error message.
        message: String,
    },
    /// One or more lanes hold NaN or an infinity.
    NonFiniteError {
        /// Indices of the lanes that are not finite.
        lanes: Vec<usize>,
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for OdeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OdeError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
            OdeError::ConfigError { parameter, message } => {
                write!(f, "Invalid configuration for `{}`: {}", parameter, message)
            }
            OdeError::NonFiniteError { lanes, message } => {
                write!(f, "Non-finite result: {} (lanes {:?})", message, lanes)
            }
        }
    }
}

impl std::error::Error for OdeError {}

/// Result type alias for simdode operations.
pub type Result<T> = std::result::Result<T, OdeError>;

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> OdeError {
    OdeError::ValidationError {
        message: message.into(),
    }
}

/// Creates a configuration error.
pub fn config_error(parameter: &'static str, message: impl Into<String>) -> OdeError {
    OdeError::ConfigError {
        parameter,
        message: message.into(),
    }
}

/// Creates a non-finite error for the given lanes.
pub fn non_finite_error(lanes: Vec<usize>, message: impl Into<String>) -> OdeError {
    OdeError::NonFiniteError {
        lanes,
        message: message.into(),
    }
}
