//! Error types for archive packing operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `PackError`.
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while packing a library tree.
#[derive(Error, Debug)]
pub enum PackError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A source directory does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },

    /// A source path exists but is not a directory.
    #[error("source is not a directory: {path}")]
    NotADirectory {
        /// The offending source path.
        path: PathBuf,
    },

    /// Directory traversal failed.
    #[error("cannot walk {path}: {source}")]
    Walk {
        /// Path being walked when the error occurred.
        path: PathBuf,
        /// Underlying walkdir error.
        #[source]
        source: walkdir::Error,
    },

    /// Reading or writing the zip container failed.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Compression level outside the supported range.
    #[error("invalid compression level {level}, expected 0-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// The bytecode compiler could not be run.
    #[error("bytecode compiler failed: {reason}")]
    Compiler {
        /// Description of the failure.
        reason: String,
    },

    /// The packing request is incomplete or contradictory.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the problem.
        reason: String,
    },

    /// A path could not be expressed as a zip entry name.
    #[error("cannot convert path to archive entry name: {path}")]
    InvalidEntryName {
        /// The offending path.
        path: PathBuf,
    },
}

impl PackError {
    /// Returns `true` if this error was caused by the caller's inputs rather
    /// than by the environment.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyzip_core::PackError;
    ///
    /// let err = PackError::InvalidCompressionLevel { level: 12 };
    /// assert!(err.is_input_error());
    ///
    /// let err = PackError::Io(std::io::Error::other("disk full"));
    /// assert!(!err.is_input_error());
    /// ```
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. }
                | Self::NotADirectory { .. }
                | Self::InvalidCompressionLevel { .. }
                | Self::InvalidConfiguration { .. }
                | Self::InvalidEntryName { .. }
        )
    }
}
