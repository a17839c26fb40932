//! Error types for field construction.

use std::error::Error;
use std::fmt;

/// Errors arising when a field is constructed with invalid parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldError {
    /// The finite-difference step is zero, negative, or not finite.
    InvalidResolution {
        /// The rejected step size.
        value: f64,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidResolution { value } => {
                write!(f, "derivative resolution must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for FieldError {}
