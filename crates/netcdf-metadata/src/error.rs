//! Error types for netCDF header parsing and parameter access.

use thiserror::Error;

/// Result type for netCDF metadata operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for netCDF header parsing and parameter access.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Missing required variable or attribute
    #[error("missing required data: {0}")]
    MissingData(String),

    /// Malformed CDL header text
    #[error("invalid header format: {0}")]
    InvalidFormat(String),

    /// No parameter with the requested name
    #[error("parameter not found: {0}")]
    ParameterNotFound(String),

    /// The parameter exists but holds a value of a different type
    #[error("parameter '{name}' is not a {expected}")]
    InvalidParameterType { name: String, expected: &'static str },

    /// The value offered for a parameter is outside its legal range
    #[error("invalid value for parameter '{name}': {reason}")]
    InvalidParameterValue { name: String, reason: String },
}
