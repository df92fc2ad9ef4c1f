//! Oscillator error types

use thiserror::Error;

/// Configuration errors, reported when an oscillator is constructed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OscillatorError {
    /// Mass must be strictly positive; acceleration divides by it every tick
    #[error("mass must be greater than zero, got {0}")]
    NonPositiveMass(f64),

    /// Precision must be strictly positive or settlement can never be detected
    #[error("precision must be greater than zero, got {0}")]
    NonPositivePrecision(f64),

    /// Spring constant and damping cannot be negative
    #[error("{field} must not be negative, got {value}")]
    NegativeCoefficient { field: &'static str, value: f64 },

    /// A NaN or infinite input
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// Result type for oscillator operations
pub type Result<T> = std::result::Result<T, OscillatorError>;
