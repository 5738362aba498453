//! Archive manifest types.

/// One entry of a packed archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name as stored in the archive (forward slashes).
    pub name: String,

    /// Whether the entry is a directory.
    pub is_dir: bool,

    /// Uncompressed size in bytes.
    pub size: u64,

    /// Compressed size in bytes.
    pub compressed_size: u64,

    /// Unix permission bits, if recorded.
    pub mode: Option<u32>,
}

/// Contents of a packed archive in archive order.
///
/// # Examples
///
/// ```
/// use pyzip_core::inspection::ArchiveEntry;
/// use pyzip_core::inspection::ArchiveManifest;
///
/// let mut manifest = ArchiveManifest::new();
/// manifest.add_entry(ArchiveEntry {
///     name: "os.py".to_string(),
///     is_dir: false,
///     size: 100,
///     compressed_size: 40,
///     mode: Some(0o644),
/// });
///
/// assert_eq!(manifest.file_count(), 1);
/// assert_eq!(manifest.total_size, 100);
/// assert!(manifest.contains("os.py"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveManifest {
    /// Entries in archive order.
    pub entries: Vec<ArchiveEntry>,

    /// Sum of uncompressed sizes.
    pub total_size: u64,

    /// Sum of compressed sizes.
    pub total_compressed: u64,
}

impl ArchiveManifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and updates the totals.
    pub fn add_entry(&mut self, entry: ArchiveEntry) {
        self.total_size += entry.size;
        self.total_compressed += entry.compressed_size;
        self.entries.push(entry);
    }

    /// Number of file entries.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_dir).count()
    }

    /// Number of directory entries.
    #[must_use]
    pub fn directory_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_dir).count()
    }

    /// Returns `true` if an entry with exactly this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Iterates over file entry names.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| !e.is_dir)
            .map(|e| e.name.as_str())
    }
}
