// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for pulse sequences and phase tables.

use std::fmt;

/// Result type alias for sequence operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug)]
pub enum Error {
    /// A value was rejected before it could be stored
    Validation(ValidationError),
    /// Something was looked up by name and not found
    Lookup(LookupError),
    /// A persisted document carries no version
    Versioning(String),
    /// A backend does not provide the requested capability
    Unsupported(String),
    /// Configuration error
    Config(String),
    /// IO error
    Io(std::io::Error),
    /// Serialization error
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(e) => write!(f, "Validation error: {}", e),
            Error::Lookup(e) => write!(f, "Lookup error: {}", e),
            Error::Versioning(msg) => write!(f, "Versioning error: {}", msg),
            Error::Unsupported(msg) => write!(f, "Unsupported operation: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
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
            Error::Lookup(e) => Some(e),
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

impl From<LookupError> for Error {
    fn from(e: LookupError) -> Self {
        Error::Lookup(e)
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

/// Validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field validation failed
    Field { field: String, message: String },
    /// Event duration rejected
    Duration(String),
    /// Event name already used in the sequence
    DuplicateEvent(String),
    /// Numeric option value outside its bounds
    OutOfRange {
        option: String,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Phase-cycle declaration cannot be turned into a table
    PhaseCycle(String),
}

fn fmt_bound(bound: &Option<f64>) -> String {
    match bound {
        Some(v) => v.to_string(),
        None => "unbounded".to_string(),
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Field { field, message } => {
                write!(f, "Field '{}': {}", field, message)
            }
            ValidationError::Duration(msg) => write!(f, "Invalid duration: {}", msg),
            ValidationError::DuplicateEvent(name) => {
                write!(f, "Event '{}' already exists in sequence", name)
            }
            ValidationError::OutOfRange {
                option,
                value,
                min,
                max,
            } => {
                write!(
                    f,
                    "Value {} for option '{}' is outside [{}, {}]",
                    value,
                    option,
                    fmt_bound(min),
                    fmt_bound(max)
                )
            }
            ValidationError::PhaseCycle(msg) => write!(f, "Invalid phase cycle: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Name lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No option with this name on the parameter
    Option { parameter: String, option: String },
    /// No function with this name in the catalog
    Function(String),
    /// No event with this name in the sequence
    Event(String),
    /// No parameter with this name on the event or in the catalog
    Parameter(String),
    /// No registered backend with this name
    Backend(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Option { parameter, option } => {
                write!(f, "Option '{}' not found on parameter '{}'", option, parameter)
            }
            LookupError::Function(name) => write!(f, "Function '{}' not found", name),
            LookupError::Event(name) => write!(f, "Event '{}' not found", name),
            LookupError::Parameter(name) => write!(f, "Parameter '{}' not found", name),
            LookupError::Backend(name) => write!(f, "Backend '{}' not found", name),
        }
    }
}

impl std::error::Error for LookupError {}
