//! Configuration for packing operations.

use crate::PackError;
use crate::Result;

/// Highest accepted compression level.
pub const MAX_COMPRESSION_LEVEL: u8 = 9;

/// Default compression level.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Configuration for packing library trees into a zip archive.
///
/// # Examples
///
/// ```
/// use pyzip_core::creation::PackConfig;
///
/// let config = PackConfig::default()
///     .with_excludes(vec!["sqlite3".to_string()])
///     .with_stubs(vec!["webbrowser.py".to_string()])
///     .with_compression_level(9)
///     .with_compile_bytecode(true);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackConfig {
    /// Paths, relative to each source root, that are always left out.
    ///
    /// Default: empty.
    pub excludes: Vec<String>,

    /// Paths, relative to each source root, that have runtime-provided
    /// implementations. Only left out of roots whose name starts with
    /// `python3`.
    ///
    /// Default: empty.
    pub stubs: Vec<String>,

    /// Compression level.
    ///
    /// `0` stores entries uncompressed, `1-9` selects deflate at that level.
    ///
    /// Default: `6`.
    pub compression_level: u8,

    /// Replace `.py` entries with compiled `.pyc` entries after packing.
    ///
    /// Default: `false`.
    pub compile_bytecode: bool,

    /// Log every entry the default filter leaves out.
    ///
    /// Default: `false`.
    pub verbose: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            excludes: Vec::new(),
            stubs: Vec::new(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            compile_bytecode: false,
            verbose: false,
        }
    }
}

impl PackConfig {
    /// Creates a new `PackConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the exclude list.
    #[must_use]
    pub fn with_excludes(mut self, excludes: Vec<String>) -> Self {
        self.excludes = excludes;
        self
    }

    /// Sets the stub list.
    #[must_use]
    pub fn with_stubs(mut self, stubs: Vec<String>) -> Self {
        self.stubs = stubs;
        self
    }

    /// Sets the compression level.
    ///
    /// Not checked here; [`PackConfig::validate`] rejects levels above 9.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = level;
        self
    }

    /// Sets whether to compile `.py` entries to bytecode.
    #[must_use]
    pub fn with_compile_bytecode(mut self, compile: bool) -> Self {
        self.compile_bytecode = compile;
        self
    }

    /// Sets whether skipped entries are logged.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::InvalidCompressionLevel`] if the level is above 9.
    pub fn validate(&self) -> Result<()> {
        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(PackError::InvalidCompressionLevel {
                level: self.compression_level,
            });
        }
        Ok(())
    }
}
