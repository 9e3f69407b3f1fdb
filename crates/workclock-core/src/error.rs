use std::fmt;

/// Result type for workclock-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the core layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed input: color markers, meeting specifications, times of day
    InvalidFormat(String),

    /// A value outside the range a component accepts (e.g. a bar narrower than its caps)
    OutOfRange(String),
}

impl Error {
    pub(crate) fn invalid_format(msg: impl Into<String>) -> Self {
        Error::InvalidFormat(msg.into())
    }

    pub(crate) fn out_of_range(msg: impl Into<String>) -> Self {
        Error::OutOfRange(msg.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
            Error::OutOfRange(msg) => write!(f, "Out of range: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
