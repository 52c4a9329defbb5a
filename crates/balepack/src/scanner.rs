//! Filtered directory enumeration
//!
//! The scanner walks the configured root and yields one [`FileEntry`] per
//! regular file that passes the extension allow-list and the per-file size
//! ceiling. Enumeration is lazy and order is deterministic (lexicographic by
//! file name at every level). An inaccessible subtree or unreadable metadata
//! yields a [`ScanError`] item instead of terminating the walk, so callers
//! can account for everything that was skipped.

use crate::config::PackerConfig;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::trace;
use walkdir::WalkDir;

/// One enumerated file: path plus byte length at enumeration time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute (or root-joined) path of the file
    pub path: PathBuf,
    /// Size in bytes as observed during enumeration
    pub size: u64,
}

impl FileEntry {
    /// Create a new file entry
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// A subtree or file the walk could not access
#[derive(Debug, Error)]
#[error("cannot access {path}: {source}")]
pub struct ScanError {
    /// Path the failure was observed at (empty when unknown)
    pub path: PathBuf,
    /// Underlying I/O error
    #[source]
    pub source: std::io::Error,
}

impl From<walkdir::Error> for ScanError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        Self { path, source }
    }
}

/// Lazy, filtered producer of [`FileEntry`] values
pub struct Scanner {
    root: PathBuf,
    max_file_bytes: u64,
    /// Allow-list, lowercased, without leading dots
    extensions: HashSet<String>,
}

impl Scanner {
    /// Create a scanner from a configuration
    pub fn new(config: &PackerConfig) -> Self {
        let extensions = config
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .collect();

        Self {
            root: config.root.clone(),
            max_file_bytes: config.max_file_bytes,
            extensions,
        }
    }

    /// Walk the root, yielding entries that pass the filters and error
    /// markers for anything inaccessible
    pub fn scan(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |item| match item {
                Err(err) => Some(Err(ScanError::from(err))),
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        return None;
                    }

                    if !self.extension_allowed(entry.path()) {
                        trace!("skipping {} (extension)", entry.path().display());
                        return None;
                    }

                    match entry.metadata() {
                        Err(err) => Some(Err(ScanError::from(err))),
                        Ok(meta) if meta.len() > self.max_file_bytes => {
                            trace!(
                                "skipping {} ({} bytes over ceiling)",
                                entry.path().display(),
                                meta.len()
                            );
                            None
                        }
                        Ok(meta) => Some(Ok(FileEntry::new(entry.into_path(), meta.len()))),
                    }
                }
            })
    }

    fn extension_allowed(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn scanner_for(root: &Path, max_file_bytes: u64) -> Scanner {
        let config = PackerConfig::new(root, root.join("out"))
            .with_max_file_bytes(max_file_bytes)
            .with_extensions(["txt", "md"]);
        Scanner::new(&config)
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("keep.txt"), b"hello").unwrap();
        fs::write(dir.path().join("keep.MD"), b"hi").unwrap();
        fs::write(dir.path().join("drop.bin"), b"nope").unwrap();

        let scanner = scanner_for(dir.path(), 1024);
        let mut names: Vec<String> = scanner
            .scan()
            .map(|item| item.expect("no scan errors"))
            .map(|entry| {
                entry
                    .path
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();

        assert_eq!(names, vec!["keep.MD", "keep.txt"]);
    }

    #[test]
    fn test_scan_applies_size_ceiling() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("small.txt"), vec![0u8; 10]).unwrap();
        fs::write(dir.path().join("large.txt"), vec![0u8; 100]).unwrap();

        let scanner = scanner_for(dir.path(), 50);
        let entries: Vec<FileEntry> = scanner.scan().map(|item| item.unwrap()).collect();

        assert_eq!(entries.len(), 1);
        assert!(entries[0].path.ends_with("small.txt"));
        assert_eq!(entries[0].size, 10);
    }

    #[test]
    fn test_scan_recurses_and_orders_deterministically() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("b_sub")).unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::write(dir.path().join("b_sub").join("c.txt"), b"c").unwrap();
        fs::write(dir.path().join("z.txt"), b"z").unwrap();

        let scanner = scanner_for(dir.path(), 1024);
        let first: Vec<PathBuf> = scanner
            .scan()
            .map(|item| item.unwrap().path)
            .collect();
        let second: Vec<PathBuf> = scanner
            .scan()
            .map(|item| item.unwrap().path)
            .collect();

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_scan_missing_root_yields_error_marker() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("does-not-exist");

        let scanner = scanner_for(&missing, 1024);
        let items: Vec<_> = scanner.scan().collect();

        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }

    #[test]
    fn test_extension_match_ignores_leading_dot_in_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("doc.pdf"), b"%PDF").unwrap();

        let config = PackerConfig::new(dir.path(), dir.path().join("out"))
            .with_extensions([".pdf"]);
        let scanner = Scanner::new(&config);

        let entries: Vec<_> = scanner.scan().map(|item| item.unwrap()).collect();
        assert_eq!(entries.len(), 1);
    }
}
