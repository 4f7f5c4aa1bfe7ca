// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
///
/// Boundary operations never return this; it covers setup and I/O around them.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
