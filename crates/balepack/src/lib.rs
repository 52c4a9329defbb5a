//! Size-capped batch archiving for document trees
//!
//! `balepack` walks a root directory for document files, greedily packs them
//! into batches whose cumulative size stays under a configurable threshold,
//! and seals each batch as a Deflate-compressed `.zip` archive whose entries
//! are keyed by root-relative paths.
//!
//! # Key Features
//!
//! - **Filtered Enumeration**: Recursive walk with an extension allow-list
//!   and a per-file size ceiling; inaccessible subtrees are reported, not
//!   fatal
//! - **Greedy Batch Planning**: Single-pass size-bounded bin-packing that
//!   preserves input order
//! - **Archive Sealing**: One batch, one zip; per-entry read failures skip
//!   only that entry and are surfaced in the result
//! - **Deterministic Naming**: `{prefix}_{run_id}_{timestamp}_{index}.zip`
//!   groups every archive produced by one run
//!
//! # Architecture
//!
//! ```text
//! Pack Flow:
//! PackerConfig → Scanner → FileEntry stream → plan_batches → Batch list
//!              → ArchiveSealer (one zip per batch) → PackReport
//! ```
//!
//! The planner is pure and performs no I/O; all filesystem work happens in
//! the scanner and the sealer. The whole pipeline is sequential and
//! single-threaded with no retries or persisted state.
//!
//! # Usage
//!
//! ```rust,no_run
//! use balepack::{Packer, PackerConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PackerConfig::new("/data/docs", "/var/tmp/bales")
//!     .with_max_archive_bytes(50 * 1024 * 1024);
//!
//! let report = Packer::new(config)?.pack()?;
//! for archive in &report.archives {
//!     println!(
//!         "{}: {} entries, {} skipped",
//!         archive.path.display(),
//!         archive.entries_written,
//!         archive.skipped.len()
//!     );
//! }
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod batch;
pub mod config;
pub mod error;
pub mod packer;
pub mod run_id;
pub mod scanner;

pub use archive::{ArchiveSealer, SealedArchive, SkippedEntry, archive_file_name};
pub use batch::{Batch, plan_batches};
pub use config::{
    DEFAULT_ARCHIVE_PREFIX, DEFAULT_MAX_ARCHIVE_BYTES, DEFAULT_MAX_FILE_BYTES, PackerConfig,
    default_document_extensions,
};
pub use error::{PackError, PackResult};
pub use packer::{PackReport, Packer};
pub use run_id::RunId;
pub use scanner::{FileEntry, ScanError, Scanner};
