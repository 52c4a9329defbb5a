//! Packer configuration
//!
//! An explicit configuration struct replaces any process-wide constants:
//! callers construct a [`PackerConfig`], tune it with the `with_*` builders,
//! and hand it to [`crate::Packer`]. Defaults mirror common document-backup
//! settings: a 50 MiB archive threshold, a 50 MiB per-file ceiling, and an
//! allow-list of document extensions.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default maximum cumulative entry size per archive (50 MiB)
pub const DEFAULT_MAX_ARCHIVE_BYTES: u64 = 50 * 1024 * 1024;

/// Default per-file size ceiling applied during enumeration (50 MiB)
pub const DEFAULT_MAX_FILE_BYTES: u64 = 50 * 1024 * 1024;

/// Default archive file-name prefix
pub const DEFAULT_ARCHIVE_PREFIX: &str = "files";

/// Default extension allow-list covering common document formats
pub fn default_document_extensions() -> Vec<String> {
    [
        "txt", "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp", "rtf",
        "csv", "xml", "html", "htm", "json", "yaml", "yml", "md", "epub", "mobi", "pages", "key",
        "numbers",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

/// Configuration for one pack run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackerConfig {
    /// Root directory to enumerate; entry paths in archives are relative to it
    pub root: PathBuf,
    /// Directory archives are written into (created if absent)
    pub output_dir: PathBuf,
    /// Prefix used in archive file names
    pub archive_prefix: String,
    /// Maximum cumulative entry size per archive (threshold T)
    pub max_archive_bytes: u64,
    /// Per-file size ceiling; larger files are excluded at enumeration time
    pub max_file_bytes: u64,
    /// Extension allow-list, matched case-insensitively without the dot
    pub extensions: Vec<String>,
}

impl PackerConfig {
    /// Create a configuration with default threshold, ceiling, prefix, and
    /// extension list
    pub fn new(root: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output_dir: output_dir.into(),
            archive_prefix: DEFAULT_ARCHIVE_PREFIX.to_string(),
            max_archive_bytes: DEFAULT_MAX_ARCHIVE_BYTES,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            extensions: default_document_extensions(),
        }
    }

    /// Set the archive size threshold
    pub fn with_max_archive_bytes(mut self, max_archive_bytes: u64) -> Self {
        self.max_archive_bytes = max_archive_bytes;
        self
    }

    /// Set the per-file size ceiling
    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    /// Set the archive file-name prefix
    pub fn with_archive_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.archive_prefix = prefix.into();
        self
    }

    /// Replace the extension allow-list
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Root directory entries are enumerated from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.root.as_os_str().is_empty() {
            return Err("root must not be empty".to_string());
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err("output_dir must not be empty".to_string());
        }

        if self.archive_prefix.is_empty() {
            return Err("archive_prefix must not be empty".to_string());
        }

        if self.max_archive_bytes == 0 {
            return Err("max_archive_bytes must be greater than 0".to_string());
        }

        if self.max_file_bytes == 0 {
            return Err("max_file_bytes must be greater than 0".to_string());
        }

        if self.extensions.is_empty() {
            return Err("extensions must not be empty".to_string());
        }

        Ok(())
    }
}
