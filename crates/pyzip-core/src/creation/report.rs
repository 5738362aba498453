//! Packing operation reporting.

use std::time::Duration;

/// Report of a packing operation.
///
/// Counts what the copy, archive and compile steps did.
///
/// # Examples
///
/// ```
/// use pyzip_core::creation::PackReport;
///
/// let mut report = PackReport::default();
/// report.bytes_written = 1000;
/// report.bytes_compressed = 250;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// assert_eq!(report.compression_percentage(), 75.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackReport {
    /// Number of source directories merged into the staging tree.
    pub sources_copied: usize,

    /// Number of files copied into the staging tree.
    pub files_staged: usize,

    /// Number of directories created in the staging tree.
    pub directories_staged: usize,

    /// Number of entries the filter left out.
    pub entries_skipped: usize,

    /// Number of file entries in the final archive.
    pub files_added: usize,

    /// Number of directory entries in the final archive.
    pub directories_added: usize,

    /// Total uncompressed bytes of file entries.
    pub bytes_written: u64,

    /// Size of the final archive on disk.
    pub bytes_compressed: u64,

    /// Number of `.py` entries replaced by `.pyc` entries.
    pub files_compiled: usize,

    /// Number of `.py` entries kept as source because compilation failed.
    pub compile_failures: usize,

    /// Duration of the whole operation.
    pub duration: Duration,

    /// Warnings generated along the way.
    pub warnings: Vec<String>,
}

impl PackReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 if either side is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.bytes_compressed as f64
    }

    /// Returns the share of space saved, in percent.
    ///
    /// Negative when the archive is larger than its contents, which is common
    /// for stored archives of small files.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_written == 0 {
            return 0.0;
        }
        (1.0 - (self.bytes_compressed as f64 / self.bytes_written as f64)) * 100.0
    }

    /// Total number of entries in the archive.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.files_added + self.directories_added
    }
}
