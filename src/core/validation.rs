//! Upload validation errors and filename helpers
//!
//! Provides security-focused validation for user uploads:
//! - Rejection reasons shared by the extension classifier and the upload gate
//! - Size limit checks
//! - Filename sanitization for storage (basename only, safe charset, bounded length)

use thiserror::Error;

/// Name used when sanitization leaves nothing behind.
pub const FALLBACK_FILENAME: &str = "unnamed_file";

/// Maximum length of a stored filename (extension included).
pub const MAX_STORED_FILENAME_LEN: usize = 100;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Reasons an upload is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The platform delivered no filename
    #[error("empty filename")]
    EmptyFilename,

    /// Filename has no `.` at all
    #[error("no extension")]
    NoExtension,

    /// Executable or otherwise dangerous file type
    #[error("file type {0} is blocked for security reasons: executable files are not allowed")]
    BlockedExtension(String),

    /// Not on the marketplace allow-list
    #[error("file type {0} is not supported")]
    UnsupportedExtension(String),

    /// Larger than the configured limit
    #[error("file too large: {:.1} MB (max {max_mb} MB)", as_mb(.size_bytes))]
    FileTooLarge { size_bytes: u64, max_mb: u64 },
}

impl ValidationError {
    /// True for security rejections (blocked extensions).
    pub fn is_blocked(&self) -> bool {
        matches!(self, ValidationError::BlockedExtension(_))
    }

    /// The offending extension, when the rejection is about one.
    pub fn extension(&self) -> Option<&str> {
        match self {
            ValidationError::BlockedExtension(ext) | ValidationError::UnsupportedExtension(ext) => Some(ext),
            _ => None,
        }
    }
}

fn as_mb(size_bytes: &u64) -> f64 {
    *size_bytes as f64 / BYTES_PER_MB as f64
}

/// Checks an upload size against a limit expressed in MiB.
///
/// # Examples
/// ```
/// use filegate::core::validation::check_file_size;
///
/// assert!(check_file_size(10 * 1024 * 1024, 10).is_ok());
/// assert!(check_file_size(10 * 1024 * 1024 + 1, 10).is_err());
/// ```
pub fn check_file_size(size_bytes: u64, max_mb: u64) -> Result<(), ValidationError> {
    let limit = max_mb.saturating_mul(BYTES_PER_MB);
    if size_bytes > limit {
        log::warn!("REJECTED: upload of {} bytes exceeds {} MB limit", size_bytes, max_mb);
        return Err(ValidationError::FileTooLarge { size_bytes, max_mb });
    }
    Ok(())
}

/// Sanitizes an uploaded filename for storage.
///
/// # Security
/// - Keeps only the basename (anything after the last `/` or `\`)
/// - Keeps only ASCII letters, digits, `.`, `_` and `-`
/// - Bounds the result to [`MAX_STORED_FILENAME_LEN`] characters, cutting the
///   stem so the extension survives
///
/// # Examples
/// ```
/// use filegate::core::validation::sanitize_filename;
///
/// assert_eq!(sanitize_filename("course.pdf"), "course.pdf");
/// assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
/// assert_eq!(sanitize_filename("my course (v2).pdf"), "mycoursev2.pdf");
/// assert_eq!(sanitize_filename("文件"), "unnamed_file");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let basename = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let sanitized: String = basename
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    if sanitized.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }

    let stored = truncate_filename(&sanitized);

    // A dots-only name is not storable; keep the suffix the classifier saw.
    if stored.trim_start_matches('.').is_empty() {
        return fallback_with_suffix(&sanitized);
    }
    stored
}

fn truncate_filename(sanitized: &str) -> String {
    // Every kept char is ASCII, so byte offsets are char offsets here.
    if sanitized.len() <= MAX_STORED_FILENAME_LEN {
        return sanitized.to_string();
    }

    let (stem, ext) = split_stem(sanitized);
    if ext.len() >= MAX_STORED_FILENAME_LEN {
        return sanitized[..MAX_STORED_FILENAME_LEN].to_string();
    }
    format!("{}{}", &stem[..MAX_STORED_FILENAME_LEN - ext.len()], ext)
}

/// `unnamed_file` plus the last-dot suffix of `name`, when that suffix fits.
fn fallback_with_suffix(name: &str) -> String {
    let suffix = name
        .rfind('.')
        .map(|pos| &name[pos..])
        .filter(|ext| ext.len() > 1 && FALLBACK_FILENAME.len() + ext.len() <= MAX_STORED_FILENAME_LEN)
        .unwrap_or("");
    format!("{}{}", FALLBACK_FILENAME, suffix)
}

/// Splits `name` into stem and extension; leading dots belong to the stem.
fn split_stem(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(pos) => name.split_at(leading + pos),
        None => (name, ""),
    }
}
