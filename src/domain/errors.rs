use thiserror::Error;

/// Failure reported by the platform while trying to obtain a position fix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("Location is currently unknown")]
    LocationUnknown,
    #[error("Location services denied access")]
    Denied,
    #[error("Network error while resolving location")]
    Network,
    #[error("Location service error: {0}")]
    Other(String),
}

/// Failure to parse one of the textual forms accepted on the command line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Unknown authorization status: {0}")]
    UnknownStatus(String),
    #[error("Invalid position '{0}', expected LAT,LON")]
    InvalidPosition(String),
    #[error("Coordinates out of range: {latitude},{longitude}")]
    OutOfRange { latitude: f64, longitude: f64 },
}

pub type ParseResult<T> = Result<T, ParseError>;
