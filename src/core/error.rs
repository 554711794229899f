use thiserror::Error;

use crate::core::validation::ValidationError;

/// Centralized error types for the application
///
/// Library enums convert into this type so callers can bubble any failure up
/// with `?`. Uses `thiserror` for conversions and display formatting.
///
/// # Example
///
/// ```no_run
/// use filegate::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Upload rejected by the gate
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Invalid environment configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading local files (CLI)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
