//! Logging initialization and configuration checking
//!
//! This module provides:
//! - Logger initialization (console + optional file)
//! - Upload configuration logging at startup

use anyhow::Result;
use simplelog::*;
use std::fs::File;
use std::str::FromStr;

use crate::core::config::UploadConfig;
use crate::files::classifier::ExtensionClassifier;

/// Parses a level name, falling back to `Info` for unknown values.
pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level).unwrap_or(LevelFilter::Info)
}

/// Initialize logger for console output and, when a path is given, a log file
///
/// # Arguments
/// * `level` - Level filter name (`info`, `debug`, ...)
/// * `log_file_path` - Optional path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to create the file or a logger was already set
pub fn init_logger(level: &str, log_file_path: Option<&str>) -> Result<()> {
    let level = parse_level(level);

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file_path {
        let log_file = File::create(path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;
        loggers.push(WriteLogger::new(level, Config::default(), log_file));
    }

    CombinedLogger::init(loggers).map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs upload configuration at application startup
///
/// Reports:
/// - Size limit
/// - Effective allow/deny table sizes
/// - Extra entries from the environment, and any allow entries that the deny
///   list overrides
pub fn log_upload_configuration(config: &UploadConfig, classifier: &ExtensionClassifier) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("📦 Upload Gate Configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("MAX_FILE_SIZE_MB: {}", config.max_file_size_mb);
    log::info!(
        "Extensions: {} allowed, {} blocked",
        classifier.list_allowed().len(),
        classifier.list_blocked().len()
    );

    if !config.extra_blocked.is_empty() {
        log::info!("Extra blocked: {}", config.extra_blocked.join(", "));
    }
    if !config.extra_allowed.is_empty() {
        log::info!("Extra allowed: {}", config.extra_allowed.join(", "));
    }

    let shadowed = shadowed_allow_entries(config, classifier);
    if !shadowed.is_empty() {
        log::warn!("⚠️  Ignored allow entries (blocked wins): {}", shadowed.join(", "));
    }

    if config.max_file_size_mb == 0 {
        log::warn!("⚠️  MAX_FILE_SIZE_MB is 0: every non-empty upload will be rejected");
    }
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

/// Extra allow entries that have no effect because the deny list wins.
pub fn shadowed_allow_entries<'a>(config: &'a UploadConfig, classifier: &ExtensionClassifier) -> Vec<&'a str> {
    config
        .extra_allowed
        .iter()
        .filter(|ext| classifier.is_blocked_extension(ext))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }

    #[test]
    fn test_init_logger_creates_log_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        // Only one logger per process: a second init in this test binary
        // fails after the file was created.
        if let Err(err) = init_logger("info", Some(path)) {
            assert!(err.to_string().contains("Failed to initialize logger"), "{}", err);
        }
        assert!(temp_file.path().exists());
    }

    #[test]
    fn test_init_logger_rejects_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing").join("app.log");

        let err = init_logger("info", missing.to_str()).unwrap_err();
        assert!(err.to_string().contains("Failed to create log file"));
    }

    #[test]
    fn test_shadowed_allow_entries() {
        let config = UploadConfig::default().with_extra_allowed([".exe", ".djvu", ".sh"]);
        let classifier = ExtensionClassifier::new(&config);

        assert_eq!(shadowed_allow_entries(&config, &classifier), vec![".exe", ".sh"]);
        log_upload_configuration(&config, &classifier);
    }

    #[test]
    fn test_no_shadowed_entries_by_default() {
        let config = UploadConfig::default();
        let classifier = ExtensionClassifier::new(&config);
        assert!(shadowed_allow_entries(&config, &classifier).is_empty());
    }
}
