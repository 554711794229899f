//! Filegate - upload gate for a Telegram digital-goods marketplace bot
//!
//! Sellers upload files through the bot; before anything reaches storage the
//! upload handler asks this library whether the file may be accepted, how to
//! label it for buyers, and what name to store it under.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, and validation helpers
//! - `files`: extension classifier and the upload gate
//! - `cli`: command-line interface of the `filegate` binary

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod cli;
pub mod core;
pub mod files;

// Re-export commonly used types for convenience
pub use crate::core::{AppError, AppResult, UploadConfig, ValidationError};
pub use crate::files::{Category, ExtensionClassifier, UploadGate, UploadReport};
