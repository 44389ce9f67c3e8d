//! Directory add reporting.

use std::time::Duration;

/// Report of an [`Archive::add_dir`](super::Archive::add_dir) call.
///
/// # Examples
///
/// ```
/// use bln_etl_core::archive::AddDirReport;
///
/// let mut report = AddDirReport::default();
/// report.record_entry("nested/test3.csv", 12);
/// report.record_hidden();
///
/// assert_eq!(report.files_added(), 1);
/// assert_eq!(report.bytes_written, 12);
/// assert_eq!(report.hidden_skipped, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddDirReport {
    /// Entry names written, in write order.
    pub entries: Vec<String>,

    /// Files skipped because their name starts with `.`.
    pub hidden_skipped: usize,

    /// Total uncompressed bytes written.
    pub bytes_written: u64,

    /// Duration of the operation.
    pub duration: Duration,
}

impl AddDirReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a written entry.
    pub fn record_entry(&mut self, name: impl Into<String>, bytes: u64) {
        self.entries.push(name.into());
        self.bytes_written += bytes;
    }

    /// Records a skipped hidden file.
    pub fn record_hidden(&mut self) {
        self.hidden_skipped += 1;
    }

    /// Number of files written.
    #[must_use]
    pub fn files_added(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
