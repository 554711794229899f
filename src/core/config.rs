//! Upload gate configuration
//!
//! Values come from environment variables with the same defaults the bot
//! ships with. They are read once into an [`UploadConfig`] that callers pass
//! to constructors; nothing here is a global.

use std::env;

use crate::core::error::{AppError, AppResult};

/// Upload size limit in MiB
/// Read from MAX_FILE_SIZE_MB environment variable
/// Default: 100
pub const MAX_FILE_SIZE_MB_VAR: &str = "MAX_FILE_SIZE_MB";

/// Comma-separated extensions to block on top of the built-in deny list
/// Read from UPLOAD_EXTRA_BLOCKED_EXTENSIONS environment variable
/// Example: `.iso,.img`
pub const EXTRA_BLOCKED_VAR: &str = "UPLOAD_EXTRA_BLOCKED_EXTENSIONS";

/// Comma-separated extensions to allow on top of the built-in allow list
/// Read from UPLOAD_EXTRA_ALLOWED_EXTENSIONS environment variable
/// Blocked extensions stay blocked even if listed here
pub const EXTRA_ALLOWED_VAR: &str = "UPLOAD_EXTRA_ALLOWED_EXTENSIONS";

/// Optional log file, in addition to the terminal
/// Read from LOG_FILE_PATH environment variable
pub const LOG_FILE_PATH_VAR: &str = "LOG_FILE_PATH";

/// Logger level filter (error, warn, info, debug, trace, off)
/// Read from LOG_LEVEL environment variable
/// Default: info
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// Default upload size limit in MiB.
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 100;

/// Default logger level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime configuration for the upload gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// Maximum accepted upload size in MiB
    pub max_file_size_mb: u64,
    /// Extra deny-list entries, normalized (`.ext`, lowercase)
    pub extra_blocked: Vec<String>,
    /// Extra allow-list entries, normalized (`.ext`, lowercase)
    pub extra_allowed: Vec<String>,
    /// Log file path, if any
    pub log_file_path: Option<String>,
    /// Logger level filter name
    pub log_level: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            extra_blocked: Vec::new(),
            extra_allowed: Vec::new(),
            log_file_path: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl UploadConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`AppError::Config`] when `MAX_FILE_SIZE_MB` is not a number or
    /// an extension list holds an entry that can never match a filename.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_file_size_mb = match lookup(MAX_FILE_SIZE_MB_VAR) {
            Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<u64>().map_err(|e| {
                AppError::Config(format!("{} must be a whole number of MB, got '{}': {}", MAX_FILE_SIZE_MB_VAR, raw, e))
            })?,
            _ => DEFAULT_MAX_FILE_SIZE_MB,
        };

        let extra_blocked = match lookup(EXTRA_BLOCKED_VAR) {
            Some(raw) => parse_extension_list(EXTRA_BLOCKED_VAR, &raw)?,
            None => Vec::new(),
        };
        let extra_allowed = match lookup(EXTRA_ALLOWED_VAR) {
            Some(raw) => parse_extension_list(EXTRA_ALLOWED_VAR, &raw)?,
            None => Vec::new(),
        };

        let log_file_path = lookup(LOG_FILE_PATH_VAR).filter(|p| !p.trim().is_empty());
        let log_level = lookup(LOG_LEVEL_VAR)
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            max_file_size_mb,
            extra_blocked,
            extra_allowed,
            log_file_path,
            log_level,
        })
    }

    /// Overrides the size limit.
    pub fn with_max_file_size_mb(mut self, max_mb: u64) -> Self {
        self.max_file_size_mb = max_mb;
        self
    }

    /// Adds deny-list entries (normalized). Invalid entries are logged and skipped.
    pub fn with_extra_blocked<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra_blocked.extend(normalize_or_skip(extensions));
        self
    }

    /// Adds allow-list entries (normalized). Invalid entries are logged and skipped.
    pub fn with_extra_allowed<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra_allowed.extend(normalize_or_skip(extensions));
        self
    }
}

fn normalize_or_skip<I, S>(extensions: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extensions
        .into_iter()
        .filter_map(|e| match normalize_extension(e.as_ref()) {
            Ok(ext) => ext,
            Err(reason) => {
                log::warn!("Skipping extension entry: {}", reason);
                None
            }
        })
        .collect()
}

/// Normalizes a user-supplied extension to `.ext` lowercase form.
///
/// Returns `Ok(None)` for blank entries. Entries that could never equal an
/// extracted extension (a lone dot, compound suffixes like `tar.gz`,
/// whitespace, path separators) are rejected with the reason.
pub fn normalize_extension(raw: &str) -> Result<Option<String>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let body = trimmed.strip_prefix('.').unwrap_or(trimmed);
    if body.is_empty() {
        return Err(format!("'{}' has nothing after the dot", trimmed));
    }
    if body.contains('.') {
        return Err(format!(
            "'{}' has more than one dot; only the last suffix of a filename is matched",
            trimmed
        ));
    }
    if body.chars().any(|c| c.is_whitespace() || matches!(c, '/' | '\\')) {
        return Err(format!("'{}' contains whitespace or a path separator", trimmed));
    }

    Ok(Some(format!(".{}", body.to_lowercase())))
}

/// Parses a comma-separated extension list from `var`, skipping blanks.
///
/// # Errors
/// Returns [`AppError::Config`] naming `var` for the first invalid entry.
pub fn parse_extension_list(var: &str, raw: &str) -> AppResult<Vec<String>> {
    let mut extensions = Vec::new();
    for entry in raw.split(',') {
        match normalize_extension(entry) {
            Ok(Some(ext)) => extensions.push(ext),
            Ok(None) => {}
            Err(reason) => return Err(AppError::Config(format!("{}: {}", var, reason))),
        }
    }
    Ok(extensions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = UploadConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, UploadConfig::default());
        assert_eq!(config.max_file_size_mb, 100);
        assert_eq!(config.log_level, "info");
        assert!(config.log_file_path.is_none());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = UploadConfig::from_lookup(lookup_from(&[
            (MAX_FILE_SIZE_MB_VAR, " 10 "),
            (EXTRA_BLOCKED_VAR, ".ISO, img"),
            (EXTRA_ALLOWED_VAR, "djvu,,"),
            (LOG_FILE_PATH_VAR, "uploads.log"),
            (LOG_LEVEL_VAR, "DEBUG"),
        ]))
        .unwrap();

        assert_eq!(config.max_file_size_mb, 10);
        assert_eq!(config.extra_blocked, vec![".iso", ".img"]);
        assert_eq!(config.extra_allowed, vec![".djvu"]);
        assert_eq!(config.log_file_path.as_deref(), Some("uploads.log"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_size_is_config_error() {
        let err = UploadConfig::from_lookup(lookup_from(&[(MAX_FILE_SIZE_MB_VAR, "ten")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains(MAX_FILE_SIZE_MB_VAR));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = UploadConfig::from_lookup(lookup_from(&[
            (MAX_FILE_SIZE_MB_VAR, "  "),
            (LOG_FILE_PATH_VAR, ""),
            (LOG_LEVEL_VAR, " "),
        ]))
        .unwrap();
        assert_eq!(config, UploadConfig::default());
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("PDF"), Ok(Some(".pdf".to_string())));
        assert_eq!(normalize_extension(" .Tar "), Ok(Some(".tar".to_string())));
        assert_eq!(normalize_extension("   "), Ok(None));
    }

    #[test]
    fn test_normalize_extension_rejects_unmatchable_entries() {
        for raw in ["tar.gz", ".tar.gz", "..gz", ".", "my ext", "a/b", "a\\b"] {
            assert!(normalize_extension(raw).is_err(), "Should reject: {}", raw);
        }
    }

    #[test]
    fn test_compound_extension_is_config_error() {
        let err = UploadConfig::from_lookup(lookup_from(&[(EXTRA_BLOCKED_VAR, ".iso, tar.gz")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains(EXTRA_BLOCKED_VAR));
        assert!(err.to_string().contains("tar.gz"));

        let err = UploadConfig::from_lookup(lookup_from(&[(EXTRA_ALLOWED_VAR, "tar.gz")])).unwrap_err();
        assert!(err.to_string().contains(EXTRA_ALLOWED_VAR));
    }

    #[test]
    fn test_builder_helpers_normalize() {
        let config = UploadConfig::default()
            .with_max_file_size_mb(5)
            .with_extra_blocked(["ISO", "tar.gz"])
            .with_extra_allowed([".DjVu", ""]);
        assert_eq!(config.max_file_size_mb, 5);
        assert_eq!(config.extra_blocked, vec![".iso"]);
        assert_eq!(config.extra_allowed, vec![".djvu"]);
    }
}
