use thiserror::Error;

/// Result type for toldiff operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the toldiff library
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Malformed class: {message}")]
    MalformedClass { message: String },
}

impl Error {
    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument { message: message.into() }
    }

    /// Create a malformed-class error
    pub fn malformed_class(message: impl Into<String>) -> Self {
        Self::MalformedClass { message: message.into() }
    }
}
