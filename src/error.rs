use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error.
    #[error("Book not found: {0}")]
    NotFound(String),

    /// Validation error on user-supplied book data.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Login rejected by the session gate.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Operation requires an authenticated session.
    #[error("Not logged in: {0}")]
    NotAuthenticated(String),

    /// Persistent storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the application.
pub type Result<T> = std::result::Result<T, AppError>;
