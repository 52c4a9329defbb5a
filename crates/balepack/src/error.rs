//! Error types for pack operations

use std::path::PathBuf;
use thiserror::Error;

/// Pack operation result type
pub type PackResult<T> = Result<T, PackError>;

/// Errors surfaced by scanning, planning, and sealing
#[derive(Debug, Error)]
pub enum PackError {
    /// Configuration rejected by validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Archive container could not be created
    #[error("failed to create archive {path}: {source}")]
    ArchiveCreate {
        /// Path the container was being created at
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Archive container could not be finalized
    #[error("failed to finalize archive {path}: {source}")]
    ArchiveFinalize {
        /// Path of the container being finalized
        path: PathBuf,
        /// Underlying zip error
        source: zip::result::ZipError,
    },

    /// An entry's path does not live under the declared root
    #[error("entry {path} is outside archive root {root}")]
    OutsideRoot {
        /// Offending entry path
        path: PathBuf,
        /// Root all entries must be relative to
        root: PathBuf,
    },

    /// Zip container error
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PackError {
    /// Check whether this error invalidates a whole archive rather than a
    /// single entry
    pub fn is_archive_fatal(&self) -> bool {
        matches!(
            self,
            Self::ArchiveCreate { .. } | Self::ArchiveFinalize { .. } | Self::Zip(_)
        )
    }
}
