//! Atomic output files.

use std::fs;
use std::fs::File;
use std::path::Path;

use tempfile::Builder;

use crate::Result;

/// Writes `output` through a temporary sibling file.
///
/// `write_fn` receives the temporary file. Only when it succeeds is the file
/// renamed over `output`; on error the temporary file is deleted and
/// `output` is left untouched.
///
/// On unix a new file gets mode `0o666` minus the process umask, like a file
/// created with [`File::create`]. When `output` already exists its mode is
/// kept.
///
/// # Errors
///
/// Returns the error from `write_fn`, or an I/O error if the temporary file
/// cannot be created or renamed.
pub fn write_atomic<T, F>(output: &Path, write_fn: F) -> Result<T>
where
    F: FnOnce(&mut File) -> Result<T>,
{
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut temp = builder.tempfile_in(dir)?;
    if let Ok(existing) = fs::metadata(output) {
        temp.as_file().set_permissions(existing.permissions())?;
    }

    let value = write_fn(temp.as_file_mut())?;
    temp.as_file().sync_all()?;
    temp.persist(output).map_err(|e| e.error)?;
    Ok(value)
}
