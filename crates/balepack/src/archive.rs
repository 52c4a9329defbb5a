//! Archive sealing
//!
//! [`ArchiveSealer`] materializes one [`Batch`] as one Deflate-compressed
//! `.zip` container. Entries are stored under their root-relative paths with
//! forward-slash separators regardless of platform.
//!
//! Failure handling follows two distinct classes rather than one silent
//! catch-all: a per-entry read failure skips only that entry and is returned
//! in [`SealedArchive::skipped`], while a container create/finalize failure
//! is an explicit `Err` to the caller. Input file handles are scoped to one
//! entry and the container writer to one archive, so both are released on
//! every exit path.

use crate::batch::Batch;
use crate::config::PackerConfig;
use crate::error::{PackError, PackResult};
use crate::run_id::RunId;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Entry size at which zip64 extensions become necessary
const ZIP32_ENTRY_LIMIT: u64 = u32::MAX as u64;

/// Build the deterministic archive file name for one batch
///
/// Shape: `{prefix}_{run_id}_{timestamp}_{index}.zip`, where `index` is the
/// zero-based batch index within the run.
pub fn archive_file_name(prefix: &str, run_id: &RunId, timestamp: &str, index: usize) -> String {
    format!("{prefix}_{run_id}_{timestamp}_{index}.zip")
}

/// An entry that could not be read while sealing its archive
#[derive(Debug)]
pub struct SkippedEntry {
    /// Path of the entry that was skipped
    pub path: PathBuf,
    /// The read error that caused the skip
    pub error: std::io::Error,
}

/// Result of sealing one batch
#[derive(Debug)]
pub struct SealedArchive {
    /// Path of the materialized container
    pub path: PathBuf,
    /// Number of entries actually written
    pub entries_written: usize,
    /// Cumulative input size of the written entries in bytes
    pub entry_bytes: u64,
    /// Entries dropped because their contents could not be read
    pub skipped: Vec<SkippedEntry>,
}

impl SealedArchive {
    /// Check whether the container ended up holding no entries
    pub fn is_empty(&self) -> bool {
        self.entries_written == 0
    }
}

/// Seals batches of one run into zip containers
pub struct ArchiveSealer {
    root: PathBuf,
    output_dir: PathBuf,
    prefix: String,
    run_id: RunId,
    timestamp: String,
}

impl ArchiveSealer {
    /// Create a sealer for one run
    ///
    /// The timestamp is fixed per run so that every archive of the run
    /// shares it in its file name.
    pub fn new(config: &PackerConfig, run_id: &RunId, timestamp: impl Into<String>) -> Self {
        Self {
            root: config.root.clone(),
            output_dir: config.output_dir.clone(),
            prefix: config.archive_prefix.clone(),
            run_id: run_id.clone(),
            timestamp: timestamp.into(),
        }
    }

    /// Seal `batch` as the archive at `index` within the run
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be created or finalized, or
    /// if an entry path does not live under the configured root. Per-entry
    /// read failures do not error; they are reported in the result.
    pub fn seal(&self, batch: &Batch, index: usize) -> PackResult<SealedArchive> {
        let name = archive_file_name(&self.prefix, &self.run_id, &self.timestamp, index);
        let path = self.output_dir.join(name);

        debug!(
            "sealing batch {} ({} entries, {} bytes) into {}",
            index,
            batch.len(),
            batch.total_bytes(),
            path.display()
        );

        let file = File::create(&path).map_err(|source| PackError::ArchiveCreate {
            path: path.clone(),
            source,
        })?;
        let mut writer = ZipWriter::new(file);

        let mut entries_written = 0;
        let mut entry_bytes = 0;
        let mut skipped = Vec::new();

        for entry in batch.entries() {
            let entry_name = relative_entry_name(&self.root, &entry.path)?;

            // Handle is scoped to this entry; a failed open skips only it.
            let mut input = match File::open(&entry.path) {
                Ok(input) => input,
                Err(error) => {
                    warn!("skipping {}: {error}", entry.path.display());
                    skipped.push(SkippedEntry {
                        path: entry.path.clone(),
                        error,
                    });
                    continue;
                }
            };

            let options = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .large_file(entry.size >= ZIP32_ENTRY_LIMIT);
            writer.start_file(entry_name.as_str(), options)?;

            match std::io::copy(&mut input, &mut writer) {
                Ok(_) => {
                    entries_written += 1;
                    entry_bytes += entry.size;
                }
                Err(error) => {
                    // Drop the half-written entry from the container and
                    // carry on with the rest of the batch.
                    writer.abort_file()?;
                    warn!("skipping {}: {error}", entry.path.display());
                    skipped.push(SkippedEntry {
                        path: entry.path.clone(),
                        error,
                    });
                }
            }
        }

        writer
            .finish()
            .map_err(|source| PackError::ArchiveFinalize {
                path: path.clone(),
                source,
            })?;

        Ok(SealedArchive {
            path,
            entries_written,
            entry_bytes,
            skipped,
        })
    }
}

/// Compute the container entry name for `path` relative to `root`
///
/// Separators are normalized to `/` on every platform.
fn relative_entry_name(root: &Path, path: &Path) -> PackResult<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| PackError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    let mut name = String::new();
    for component in relative.components() {
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str(&component.as_os_str().to_string_lossy());
    }

    Ok(name)
}
