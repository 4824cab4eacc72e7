//! Error types shared by the analysis and synthesis crates.

use thiserror::Error;

/// Errors raised by signal construction, filter design, and spectral transforms.
///
/// All operations in tonesweep are pure and deterministic, so none of these
/// are worth retrying without different inputs.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// Band is inverted, negative, or reaches the Nyquist frequency.
    #[error("invalid band [{low_hz} Hz, {high_hz} Hz]: {reason}")]
    InvalidBand {
        /// Lower edge in Hz.
        low_hz: f32,
        /// Upper edge in Hz.
        high_hz: f32,
        /// Why the band was rejected.
        reason: String,
    },

    /// A scalar parameter is out of its valid domain.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A transform or metric was asked to work on zero samples.
    #[error("empty signal: {0} requires at least one sample")]
    EmptySignal(&'static str),
}

impl Error {
    /// Create an invalid band error.
    pub fn invalid_band(low_hz: f32, high_hz: f32, reason: impl Into<String>) -> Self {
        Error::InvalidBand {
            low_hz,
            high_hz,
            reason: reason.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Convenience result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
