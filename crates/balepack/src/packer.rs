//! Sequential pack orchestration
//!
//! [`Packer`] drives one run end to end: validate the configuration, scan
//! the root, plan batches, and seal each batch into an archive. The pipeline
//! is single-threaded and synchronous, with no retries and no persisted
//! state; everything a caller needs to act on — archive paths, per-archive
//! skip lists, inaccessible subtrees — comes back in the [`PackReport`].

use crate::archive::{ArchiveSealer, SealedArchive};
use crate::batch::plan_batches;
use crate::config::PackerConfig;
use crate::error::{PackError, PackResult};
use crate::run_id::RunId;
use crate::scanner::{FileEntry, ScanError, Scanner};
use chrono::Utc;
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of one pack run
#[derive(Debug)]
pub struct PackReport {
    /// Identifier shared by every archive of this run
    pub run_id: RunId,
    /// Sealed archives in batch order
    pub archives: Vec<SealedArchive>,
    /// Subtrees and files the scan could not access
    pub inaccessible: Vec<ScanError>,
}

impl PackReport {
    /// Total entries written across all archives
    pub fn total_entries_written(&self) -> usize {
        self.archives.iter().map(|a| a.entries_written).sum()
    }

    /// Total entries skipped across all archives
    pub fn total_skipped(&self) -> usize {
        self.archives.iter().map(|a| a.skipped.len()).sum()
    }

    /// Cumulative input bytes written across all archives
    pub fn total_entry_bytes(&self) -> u64 {
        self.archives.iter().map(|a| a.entry_bytes).sum()
    }

    /// Paths of the materialized archives, in emission order
    pub fn archive_paths(&self) -> impl Iterator<Item = &Path> {
        self.archives.iter().map(|a| a.path.as_path())
    }
}

/// Drives scan → plan → seal for one configuration
#[derive(Debug)]
pub struct Packer {
    config: PackerConfig,
}

impl Packer {
    /// Create a packer from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`PackError::InvalidConfig`] if validation fails.
    pub fn new(config: PackerConfig) -> PackResult<Self> {
        config.validate().map_err(PackError::InvalidConfig)?;
        Ok(Self { config })
    }

    /// The configuration this packer runs with
    pub fn config(&self) -> &PackerConfig {
        &self.config
    }

    /// Run one pack with a freshly generated run identifier
    pub fn pack(&self) -> PackResult<PackReport> {
        self.pack_with_run_id(RunId::generate())
    }

    /// Run one pack under an explicit run identifier
    pub fn pack_with_run_id(&self, run_id: RunId) -> PackResult<PackReport> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        info!(
            "pack run {} starting: root {}, threshold {} bytes",
            run_id,
            self.config.root.display(),
            self.config.max_archive_bytes
        );

        let scanner = Scanner::new(&self.config);
        let mut entries: Vec<FileEntry> = Vec::new();
        let mut inaccessible: Vec<ScanError> = Vec::new();

        for item in scanner.scan() {
            match item {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    warn!("{err}");
                    inaccessible.push(err);
                }
            }
        }

        debug!(
            "scan finished: {} entries, {} inaccessible",
            entries.len(),
            inaccessible.len()
        );

        let batches = plan_batches(entries, self.config.max_archive_bytes);
        let timestamp = Utc::now().format("%Y%m%d%H%M%S").to_string();
        let sealer = ArchiveSealer::new(&self.config, &run_id, timestamp);

        let mut archives = Vec::with_capacity(batches.len());
        for (index, batch) in batches.iter().enumerate() {
            let sealed = sealer.seal(batch, index)?;
            if sealed.is_empty() {
                warn!(
                    "archive {} contains no entries (all {} inputs unreadable)",
                    sealed.path.display(),
                    batch.len()
                );
            }
            archives.push(sealed);
        }

        let report = PackReport {
            run_id,
            archives,
            inaccessible,
        };

        info!(
            "pack run {} finished: {} archives, {} entries, {} bytes, {} skipped",
            report.run_id,
            report.archives.len(),
            report.total_entries_written(),
            report.total_entry_bytes(),
            report.total_skipped()
        );

        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PackerConfig::new("/src", "/out").with_max_archive_bytes(0);
        assert!(matches!(
            Packer::new(config),
            Err(PackError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_pack_empty_root_produces_no_archives() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("docs");
        std::fs::create_dir_all(&root).unwrap();

        let config = PackerConfig::new(&root, dir.path().join("out"));
        let report = Packer::new(config).unwrap().pack().expect("pack succeeds");

        assert!(report.archives.is_empty());
        assert!(report.inaccessible.is_empty());
        assert_eq!(report.total_entries_written(), 0);
    }

    #[test]
    fn test_pack_creates_output_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("docs");
        let output = dir.path().join("nested").join("out");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("a.txt"), b"data").unwrap();

        let config = PackerConfig::new(&root, &output);
        let report = Packer::new(config).unwrap().pack().expect("pack succeeds");

        assert!(output.is_dir());
        assert_eq!(report.archives.len(), 1);
        assert_eq!(report.total_entries_written(), 1);
    }

    #[test]
    fn test_pack_missing_root_is_reported_not_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = PackerConfig::new(dir.path().join("absent"), dir.path().join("out"));

        let report = Packer::new(config).unwrap().pack().expect("pack succeeds");

        assert!(report.archives.is_empty());
        assert_eq!(report.inaccessible.len(), 1);
    }
}
