// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the transport simulator.

use std::fmt;

/// Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Simulator error types.
#[derive(Debug)]
pub enum Error {
    /// Configuration file or environment error
    Config(String),
    /// Invalid simulation parameters
    Validation(ValidationError),
    /// Propagation produced an unphysical value
    Numerical(NumericalError),
    /// IO error
    Io(std::io::Error),
    /// Serialization error
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Validation(e) => write!(f, "Validation error: {}", e),
            Error::Numerical(e) => write!(f, "Numerical instability: {}", e),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Validation(e) => Some(e),
            Error::Numerical(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl From<NumericalError> for Error {
    fn from(e: NumericalError) -> Self {
        Error::Numerical(e)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Parameter validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field validation failed
    Field { field: String, message: String },
    /// Physics constraint violated
    PhysicsConstraint(String),
}

impl ValidationError {
    /// Shorthand for a [`ValidationError::Field`].
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        ValidationError::Field {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Field { field, message } => {
                write!(f, "Field '{}': {}", field, message)
            }
            ValidationError::PhysicsConstraint(msg) => {
                write!(f, "Physics constraint violated: {}", msg)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Unphysical values produced during propagation.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericalError {
    /// Population is NaN or infinite
    NonFinite { step: usize, value: f64 },
    /// Population left [-tolerance, 1 + tolerance]
    OutOfRange {
        step: usize,
        value: f64,
        tolerance: f64,
    },
    /// Diagonal entry carries an imaginary part beyond tolerance
    ComplexPopulation { step: usize, imaginary: f64 },
    /// A failure inside one disorder realization of an ensemble run
    InSample {
        rate: f64,
        sample: usize,
        source: Box<NumericalError>,
    },
}

impl NumericalError {
    /// Attach ensemble context to a per-step failure.
    pub fn in_sample(self, rate: f64, sample: usize) -> Self {
        NumericalError::InSample {
            rate,
            sample,
            source: Box::new(self),
        }
    }

    /// Time step at which the instability was detected.
    pub fn step(&self) -> usize {
        match self {
            NumericalError::NonFinite { step, .. }
            | NumericalError::OutOfRange { step, .. }
            | NumericalError::ComplexPopulation { step, .. } => *step,
            NumericalError::InSample { source, .. } => source.step(),
        }
    }
}

impl fmt::Display for NumericalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericalError::NonFinite { step, value } => {
                write!(f, "non-finite population {} at step {}", value, step)
            }
            NumericalError::OutOfRange {
                step,
                value,
                tolerance,
            } => {
                write!(
                    f,
                    "population {} outside [0, 1] (tolerance {:e}) at step {}",
                    value, tolerance, step
                )
            }
            NumericalError::ComplexPopulation { step, imaginary } => {
                write!(
                    f,
                    "population has imaginary part {:e} at step {}",
                    imaginary, step
                )
            }
            NumericalError::InSample {
                rate,
                sample,
                source,
            } => {
                write!(f, "rate {} sample {}: {}", rate, sample, source)
            }
        }
    }
}

impl std::error::Error for NumericalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NumericalError::InSample { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
