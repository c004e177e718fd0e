use std::fmt;

/// Error represents the failures that cell and rectangle operations can
/// surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A cell identifier that is zero, has its face bits ≥ 6, or is missing
    /// its level sentinel bit.
    InvalidCellID(String),
    /// A latitude-longitude coordinate or rectangle outside the valid range
    /// for an operation that requires validity.
    InvalidCoordinate(String),
    /// A subdivision level outside [0, 30], or a parent level deeper than
    /// the cell it is requested from.
    InvalidLevel(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCellID(msg) => write!(f, "invalid cell id: {}", msg),
            Error::InvalidCoordinate(msg) => write!(f, "invalid coordinate: {}", msg),
            Error::InvalidLevel(msg) => write!(f, "invalid level: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Result type for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
