//! Extension classifier for marketplace uploads
//!
//! Decides whether an uploaded file's name may be accepted, assigns it a
//! display category and flags archives. Works on the name only; file contents
//! (including archive members) are never inspected.
//!
//! The deny list is always consulted before the allow list, so an extension
//! present in both is rejected.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::tables;
use crate::core::config::UploadConfig;
use crate::core::validation::ValidationError;

/// Display category of an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Document,
    Video,
    Audio,
    Image,
    Archive,
    Code,
    Design,
    Other,
}

impl Category {
    /// Built-in extensions for this category (empty for `Other`).
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Category::Document => tables::DOCUMENT_EXTENSIONS,
            Category::Video => tables::VIDEO_EXTENSIONS,
            Category::Audio => tables::AUDIO_EXTENSIONS,
            Category::Image => tables::IMAGE_EXTENSIONS,
            Category::Archive => tables::ARCHIVE_EXTENSIONS,
            Category::Code => tables::CODE_EXTENSIONS,
            Category::Design => tables::DESIGN_EXTENSIONS,
            Category::Other => &[],
        }
    }
}

/// Lookup order for categorization.
const CATEGORY_ORDER: [Category; 7] = [
    Category::Document,
    Category::Video,
    Category::Audio,
    Category::Image,
    Category::Archive,
    Category::Code,
    Category::Design,
];

/// Extracts the extension of a filename: everything from the last `.` of the
/// lowercased name, dot included.
///
/// # Examples
/// ```
/// use filegate::files::classifier::extract_extension;
///
/// assert_eq!(extract_extension("Report.PDF").as_deref(), Some(".pdf"));
/// assert_eq!(extract_extension("archive.tar.gz").as_deref(), Some(".gz"));
/// assert_eq!(extract_extension("README"), None);
/// ```
pub fn extract_extension(filename: &str) -> Option<String> {
    let lowered = filename.to_lowercase();
    lowered.rfind('.').map(|pos| lowered[pos..].to_string())
}

/// Allow/deny tables the classifier evaluates
///
/// Built once and never mutated; share it by reference (it is `Send + Sync`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionClassifier {
    blocked: BTreeSet<String>,
    allowed: BTreeSet<String>,
}

impl Default for ExtensionClassifier {
    fn default() -> Self {
        Self::new(&UploadConfig::default())
    }
}

impl ExtensionClassifier {
    /// Builds the built-in tables plus the extra entries from `config`.
    pub fn new(config: &UploadConfig) -> Self {
        let blocked = tables::BLOCKED_EXTENSIONS
            .iter()
            .map(|ext| ext.to_string())
            .chain(config.extra_blocked.iter().cloned())
            .collect();
        let allowed = tables::allowed_extensions()
            .map(str::to_string)
            .chain(config.extra_allowed.iter().cloned())
            .collect();

        Self::with_tables(blocked, allowed)
    }

    /// Uses the given tables verbatim (entries must already be `.ext` lowercase).
    pub fn with_tables(blocked: BTreeSet<String>, allowed: BTreeSet<String>) -> Self {
        Self { blocked, allowed }
    }

    /// Validates a filename against the deny list, then the allow list.
    ///
    /// # Returns
    /// * `Ok(())` if the extension is allowed
    /// * `Err(ValidationError)` with the rejection reason otherwise
    ///
    /// # Examples
    /// ```
    /// use filegate::core::validation::ValidationError;
    /// use filegate::files::classifier::ExtensionClassifier;
    ///
    /// let classifier = ExtensionClassifier::default();
    /// assert!(classifier.validate("course.pdf").is_ok());
    /// assert_eq!(
    ///     classifier.validate("setup.exe"),
    ///     Err(ValidationError::BlockedExtension(".exe".to_string()))
    /// );
    /// ```
    pub fn validate(&self, filename: &str) -> Result<(), ValidationError> {
        if filename.is_empty() {
            log::warn!("REJECTED: empty filename");
            return Err(ValidationError::EmptyFilename);
        }

        let Some(ext) = extract_extension(filename) else {
            log::warn!("REJECTED: no extension (filename: {})", filename);
            return Err(ValidationError::NoExtension);
        };

        // Deny list first: an extension in both tables is blocked.
        if self.blocked.contains(&ext) {
            log::warn!(
                "🚫 BLOCKED: attempted upload of dangerous file type {} (filename: {})",
                ext,
                filename
            );
            return Err(ValidationError::BlockedExtension(ext));
        }

        if !self.allowed.contains(&ext) {
            log::warn!("⚠️ REJECTED: unsupported file type {} (filename: {})", ext, filename);
            return Err(ValidationError::UnsupportedExtension(ext));
        }

        log::info!("✅ VALIDATED: file type {} is allowed (filename: {})", ext, filename);
        Ok(())
    }

    /// Display category of a filename. Independent of [`validate`](Self::validate).
    pub fn categorize(&self, filename: &str) -> Category {
        let Some(ext) = extract_extension(filename) else {
            return Category::Other;
        };
        CATEGORY_ORDER
            .into_iter()
            .find(|category| category.extensions().contains(&ext.as_str()))
            .unwrap_or(Category::Other)
    }

    /// True for archive formats. Callers should warn that contents are not scanned.
    pub fn is_archive(&self, filename: &str) -> bool {
        extract_extension(filename).is_some_and(|ext| tables::ARCHIVE_EXTENSIONS.contains(&ext.as_str()))
    }

    /// Whether a normalized extension is on the deny list.
    pub fn is_blocked_extension(&self, ext: &str) -> bool {
        self.blocked.contains(ext)
    }

    /// Sorted snapshot of the allow list.
    pub fn list_allowed(&self) -> Vec<String> {
        self.allowed.iter().cloned().collect()
    }

    /// Sorted snapshot of the deny list.
    pub fn list_blocked(&self) -> Vec<String> {
        self.blocked.iter().cloned().collect()
    }
}

static DEFAULT_CLASSIFIER: Lazy<ExtensionClassifier> = Lazy::new(ExtensionClassifier::default);

/// Built-in classifier shared by the free functions below.
pub fn default_classifier() -> &'static ExtensionClassifier {
    &DEFAULT_CLASSIFIER
}

/// [`ExtensionClassifier::validate`] with the built-in tables.
pub fn validate_file_extension(filename: &str) -> Result<(), ValidationError> {
    DEFAULT_CLASSIFIER.validate(filename)
}

/// [`ExtensionClassifier::categorize`] with the built-in tables.
pub fn get_file_category(filename: &str) -> Category {
    DEFAULT_CLASSIFIER.categorize(filename)
}

/// [`ExtensionClassifier::is_archive`] with the built-in tables.
pub fn is_archive_file(filename: &str) -> bool {
    DEFAULT_CLASSIFIER.is_archive(filename)
}

/// Sorted built-in allow list, for help text.
pub fn allowed_extensions() -> Vec<String> {
    DEFAULT_CLASSIFIER.list_allowed()
}

/// Sorted built-in deny list, for help text.
pub fn blocked_extensions() -> Vec<String> {
    DEFAULT_CLASSIFIER.list_blocked()
}
