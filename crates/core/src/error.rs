//! Error types for surfit

use thiserror::Error;

/// Main error type for surfit operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("No sample points provided")]
    EmptyInput,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Target ({x}, {y}) lies outside the triangulated region")]
    OutOfHull { x: f64, y: f64 },
}

/// Coarse classification of an [`Error`].
///
/// Empty point sets, malformed coordinates and out-of-range parameters all
/// count as invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    DegenerateGeometry,
    OutOfHull,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput | Error::InvalidInput(_) | Error::InvalidParameter { .. } => {
                ErrorKind::InvalidInput
            }
            Error::DegenerateGeometry(_) => ErrorKind::DegenerateGeometry,
            Error::OutOfHull { .. } => ErrorKind::OutOfHull,
        }
    }

    /// Build an [`Error::InvalidParameter`] for a numeric parameter.
    pub fn invalid_parameter(name: &'static str, value: f64, reason: &str) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for surfit operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(Error::EmptyInput.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            Error::invalid_parameter("power", -1.0, "must be > 0").kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            Error::DegenerateGeometry("collinear".into()).kind(),
            ErrorKind::DegenerateGeometry
        );
        assert_eq!(
            Error::OutOfHull { x: 1.0, y: 2.0 }.kind(),
            ErrorKind::OutOfHull
        );
    }

    #[test]
    fn test_parameter_message() {
        let err = Error::invalid_parameter("bandwidth", 0.0, "must be > 0");
        assert_eq!(
            err.to_string(),
            "Invalid parameter: bandwidth = 0 (must be > 0)"
        );
    }
}
