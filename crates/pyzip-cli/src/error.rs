//! Error conversion utilities for CLI.
//!
//! Converts pyzip-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use pyzip_core::PackError;
use std::path::Path;

/// Converts `PackError` to user-friendly anyhow error with context
pub fn convert_pack_error(err: PackError, target: &Path) -> anyhow::Error {
    match err {
        PackError::SourceNotFound { path } => {
            anyhow!(
                "Source directory not found: {}\n\
                 HINT: Check the path; every SOURCE must be an existing directory.",
                path.display()
            )
        }
        PackError::NotADirectory { path } => {
            anyhow!(
                "Source is not a directory: {}\n\
                 HINT: Pass the library directory, not a single file.",
                path.display()
            )
        }
        PackError::InvalidCompressionLevel { level } => {
            anyhow!(
                "Invalid compression level {level}\n\
                 HINT: Use 0 to store entries or 1-9 to deflate them."
            )
        }
        PackError::Compiler { reason } => {
            anyhow!(
                "Bytecode compilation failed for '{}': {}\n\
                 HINT: Use --python to point at the interpreter that will import the archive.",
                target.display(),
                reason
            )
        }
        PackError::Zip(zip_err) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted or not a zip file.",
                target.display(),
                zip_err
            )
        }
        PackError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                target.display(),
                io_err
            )
        }
        _ => anyhow::Error::from(err).context(format!("Error processing '{}'", target.display())),
    }
}

/// Adds context to a library result about the archive being processed
pub fn add_pack_context<T>(result: Result<T, PackError>, target: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_pack_error(e, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_source_not_found() {
        let err = PackError::SourceNotFound {
            path: PathBuf::from("/opt/python3.13/lib"),
        };
        let converted = convert_pack_error(err, Path::new("python.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("/opt/python3.13/lib"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_compiler_error() {
        let err = PackError::Compiler {
            reason: "cannot run python3".to_string(),
        };
        let converted = convert_pack_error(err, Path::new("python.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("--python"));
        assert!(msg.contains("python.zip"));
    }

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let converted = convert_pack_error(PackError::Io(io_err), Path::new("python.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("I/O error"));
    }

    #[test]
    fn test_other_errors_keep_context() {
        let err = PackError::InvalidConfiguration {
            reason: "no sources".to_string(),
        };
        let converted = convert_pack_error(err, Path::new("python.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("python.zip"));
        assert!(msg.contains("no sources"));
    }
}
