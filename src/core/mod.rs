//! Core utilities, configuration, and common functionality

pub mod config;
pub mod error;
pub mod logging;
pub mod validation;

// Re-exports for convenience
pub use config::UploadConfig;
pub use error::{AppError, AppResult};
pub use logging::{init_logger, log_upload_configuration, shadowed_allow_entries};
pub use validation::{ValidationError, check_file_size, sanitize_filename};
