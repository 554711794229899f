//! Marketplace upload checks: extension classification and the upload gate

pub mod classifier;
pub mod tables;
pub mod upload;

// Re-exports for convenience
pub use classifier::{
    Category, ExtensionClassifier, allowed_extensions, blocked_extensions, extract_extension, get_file_category,
    is_archive_file, validate_file_extension,
};
pub use upload::{UploadGate, UploadReport};
