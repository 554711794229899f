//! Upload gate: everything the upload handler checks before storing a seller's file.
//!
//! Order matters: the extension verdict comes first (a blocked executable is
//! reported as blocked even when it is also too large), then the size limit.

use serde::Serialize;

use super::classifier::{Category, ExtensionClassifier, extract_extension};
use crate::core::config::UploadConfig;
use crate::core::validation::{ValidationError, check_file_size, sanitize_filename};

/// What the gate learned about an accepted upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReport {
    /// Name as received from the messaging platform
    pub original_name: String,
    /// Storage-safe name
    pub stored_name: String,
    /// Lowercase, dot-prefixed extension
    pub extension: String,
    pub category: Category,
    /// Archives are accepted but their contents are not scanned
    pub is_archive: bool,
    /// Size in bytes, when the caller knew it
    pub size_bytes: Option<u64>,
}

/// Extension classifier plus size limit
#[derive(Debug, Clone)]
pub struct UploadGate {
    classifier: ExtensionClassifier,
    max_file_size_mb: u64,
}

impl Default for UploadGate {
    fn default() -> Self {
        Self::new(&UploadConfig::default())
    }
}

impl UploadGate {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            classifier: ExtensionClassifier::new(config),
            max_file_size_mb: config.max_file_size_mb,
        }
    }

    pub fn classifier(&self) -> &ExtensionClassifier {
        &self.classifier
    }

    pub fn max_file_size_mb(&self) -> u64 {
        self.max_file_size_mb
    }

    /// Runs every check on an upload of known size.
    ///
    /// # Examples
    /// ```
    /// use filegate::files::classifier::Category;
    /// use filegate::files::upload::UploadGate;
    ///
    /// let gate = UploadGate::default();
    /// let report = gate.inspect("My Course.PDF", 2 * 1024 * 1024).unwrap();
    /// assert_eq!(report.category, Category::Document);
    /// assert_eq!(report.stored_name, "MyCourse.PDF");
    /// ```
    pub fn inspect(&self, filename: &str, size_bytes: u64) -> Result<UploadReport, ValidationError> {
        self.run(filename, Some(size_bytes))
    }

    /// Runs the name checks only, for callers that do not know the size yet.
    pub fn inspect_name(&self, filename: &str) -> Result<UploadReport, ValidationError> {
        self.run(filename, None)
    }

    fn run(&self, filename: &str, size_bytes: Option<u64>) -> Result<UploadReport, ValidationError> {
        self.classifier.validate(filename)?;

        if let Some(size) = size_bytes {
            check_file_size(size, self.max_file_size_mb)?;
        }

        // validate() already rejected names without a dot.
        let extension = extract_extension(filename).ok_or(ValidationError::NoExtension)?;
        let is_archive = self.classifier.is_archive(filename);
        if is_archive {
            log::warn!("Archive accepted without content scan: {}", filename);
        }

        Ok(UploadReport {
            original_name: filename.to_string(),
            stored_name: sanitize_filename(filename),
            extension,
            category: self.classifier.categorize(filename),
            is_archive,
            size_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn test_inspect_accepts_document() {
        let gate = UploadGate::default();
        let report = gate.inspect("course.pdf", 3 * MB).unwrap();

        assert_eq!(report.original_name, "course.pdf");
        assert_eq!(report.stored_name, "course.pdf");
        assert_eq!(report.extension, ".pdf");
        assert_eq!(report.category, Category::Document);
        assert!(!report.is_archive);
        assert_eq!(report.size_bytes, Some(3 * MB));
    }

    #[test]
    fn test_inspect_flags_archive() {
        let report = UploadGate::default().inspect_name("assets.zip").unwrap();
        assert!(report.is_archive);
        assert_eq!(report.category, Category::Archive);
        assert_eq!(report.size_bytes, None);
    }

    #[test]
    fn test_inspect_rejects_oversized() {
        let gate = UploadGate::new(&UploadConfig::default().with_max_file_size_mb(10));
        assert!(gate.inspect("video.mp4", 10 * MB).is_ok());
        assert_eq!(
            gate.inspect("video.mp4", 10 * MB + 1),
            Err(ValidationError::FileTooLarge {
                size_bytes: 10 * MB + 1,
                max_mb: 10
            })
        );
    }

    #[test]
    fn test_extension_verdict_precedes_size() {
        let gate = UploadGate::new(&UploadConfig::default().with_max_file_size_mb(1));
        let err = gate.inspect("setup.exe", 50 * MB).unwrap_err();
        assert!(err.is_blocked());
    }

    #[test]
    fn test_stored_name_is_sanitized() {
        let report = UploadGate::default().inspect_name("../секрет/Mon cours (final).pdf").unwrap();
        assert_eq!(report.stored_name, "Moncoursfinal.pdf");
        assert_eq!(report.original_name, "../секрет/Mon cours (final).pdf");
    }

    #[test]
    fn test_report_serializes() {
        let report = UploadGate::default().inspect("Photo.JPG", 1024).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["category"], "image");
        assert_eq!(json["extension"], ".jpg");
        assert_eq!(json["is_archive"], false);
        assert_eq!(json["size_bytes"], 1024);
    }
}
