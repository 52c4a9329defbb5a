//! Greedy size-bounded batch planning
//!
//! [`plan_batches`] partitions an ordered sequence of [`FileEntry`] values
//! into [`Batch`] groups whose cumulative size does not exceed a threshold.
//! The planner is a single greedy pass, performs no I/O, and preserves input
//! order exactly: concatenating the entries of the emitted batches
//! reproduces the input with no loss or duplication.
//!
//! # Invariants
//!
//! - Every batch's cumulative size is ≤ the threshold, with one exception:
//!   an entry whose size alone exceeds the threshold is placed in a batch by
//!   itself rather than dropped, so the planner never stalls
//! - Batches are emitted in input order and are never empty
//! - Empty input produces zero batches

use crate::scanner::FileEntry;

/// An ordered group of entries destined for one archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    entries: Vec<FileEntry>,
    total_bytes: u64,
}

impl Batch {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            total_bytes: 0,
        }
    }

    fn push(&mut self, entry: FileEntry) {
        self.total_bytes += entry.size;
        self.entries.push(entry);
    }

    /// Entries in this batch, in input order
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Cumulative size of all entries in bytes
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Number of entries in this batch
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if this batch holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Partition `entries` into size-bounded batches
///
/// Greedy single pass: the current batch is sealed whenever appending the
/// next entry would push its cumulative size over `threshold`, except that
/// an empty batch always accepts at least one entry regardless of size.
pub fn plan_batches(entries: impl IntoIterator<Item = FileEntry>, threshold: u64) -> Vec<Batch> {
    let mut batches = Vec::new();
    let mut current = Batch::new();

    for entry in entries {
        if !current.is_empty() && current.total_bytes + entry.size > threshold {
            batches.push(std::mem::replace(&mut current, Batch::new()));
        }
        current.push(entry);
    }

    if !current.is_empty() {
        batches.push(current);
    }

    batches
}
