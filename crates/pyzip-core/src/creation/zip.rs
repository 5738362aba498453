//! ZIP archive writing.
//!
//! Turns the staging directory into the final archive. Entries are written in
//! sorted path order with fixed timestamps, so packing the same tree twice
//! produces the same bytes.

use crate::PackError;
use crate::ProgressCallback;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_progress;
use crate::creation::atomic::write_atomic;
use std::fs::File;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::DateTime;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Statistics of one written archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    /// File entries written.
    pub files: usize,
    /// Directory entries written.
    pub directories: usize,
    /// Uncompressed bytes of all file entries.
    pub bytes_written: u64,
    /// Size of the archive on disk.
    pub bytes_compressed: u64,
}

/// Returns the entry options for a compression level.
///
/// Level `0` stores entries; any other level deflates at that level.
///
/// # Examples
///
/// ```
/// use pyzip_core::creation::zip::entry_options;
///
/// let stored = entry_options(0);
/// let deflated = entry_options(9);
/// ```
#[must_use]
pub fn entry_options(level: u8) -> SimpleFileOptions {
    let options = SimpleFileOptions::default().last_modified_time(DateTime::default());
    if level == 0 {
        options.compression_method(CompressionMethod::Stored)
    } else {
        options
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(level)))
    }
}

/// Writes every entry below `staging` into a ZIP archive at `output`.
///
/// Entry names are paths relative to `staging` with forward slashes;
/// directories get explicit `name/` entries. The archive is written to a
/// temporary file next to `output` and renamed into place on success.
///
/// # Examples
///
/// ```no_run
/// use pyzip_core::NoopProgress;
/// use pyzip_core::creation::zip::write_zip;
/// use std::path::Path;
///
/// let stats = write_zip(
///     Path::new("python.zip"),
///     Path::new("/tmp/staging"),
///     6,
///     &mut NoopProgress,
/// )?;
/// println!("{} files", stats.files);
/// # Ok::<(), pyzip_core::PackError>(())
/// ```
///
/// # Errors
///
/// Returns an error if the staging tree cannot be walked, a file cannot be
/// read, or the archive cannot be written.
pub fn write_zip(
    output: &Path,
    staging: &Path,
    level: u8,
    progress: &mut dyn ProgressCallback,
) -> Result<WriteStats> {
    let entries = collect_entries(staging)?;
    write_atomic(output, |file| {
        let mut stats = write_entries(&mut *file, &entries, level, progress)?;
        stats.bytes_compressed = file.metadata()?.len();
        Ok(stats)
    })
}

/// One staged path and its name inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StagedEntry {
    path: PathBuf,
    name: String,
    is_dir: bool,
}

fn collect_entries(staging: &Path) -> Result<Vec<StagedEntry>> {
    if !staging.is_dir() {
        return Err(PackError::SourceNotFound {
            path: staging.to_path_buf(),
        });
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(staging).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| PackError::Walk {
            path: staging.to_path_buf(),
            source,
        })?;
        let relative = entry
            .path()
            .strip_prefix(staging)
            .map_err(|_| PackError::InvalidEntryName {
                path: entry.path().to_path_buf(),
            })?;

        entries.push(StagedEntry {
            path: entry.path().to_path_buf(),
            name: zip_entry_name(relative)?,
            is_dir: entry.file_type().is_dir(),
        });
    }

    Ok(entries)
}

fn write_entries<W: Write + Seek>(
    writer: W,
    entries: &[StagedEntry],
    level: u8,
    progress: &mut dyn ProgressCallback,
) -> Result<WriteStats> {
    let mut zip = ZipWriter::new(writer);
    let options = entry_options(level);
    let mut buffer = CopyBuffer::new();
    let mut stats = WriteStats::default();
    let total = entries.len();

    for (idx, entry) in entries.iter().enumerate() {
        let archive_path = Path::new(&entry.name);
        progress.on_entry_start(archive_path, total, idx + 1);

        if entry.is_dir {
            zip.add_directory(format!("{}/", entry.name), options)?;
            stats.directories += 1;
        } else {
            let mut file = File::open(&entry.path)?;
            let metadata = file.metadata()?;
            let file_options = with_permissions(options, &metadata)
                .large_file(metadata.len() >= u64::from(u32::MAX));

            zip.start_file(entry.name.as_str(), file_options)?;
            stats.bytes_written += copy_with_progress(&mut file, &mut zip, &mut buffer, progress)?;
            stats.files += 1;
        }

        progress.on_entry_complete(archive_path);
    }

    zip.finish()?;
    progress.on_complete();

    Ok(stats)
}

#[cfg(unix)]
fn with_permissions(options: SimpleFileOptions, metadata: &std::fs::Metadata) -> SimpleFileOptions {
    use std::os::unix::fs::PermissionsExt;
    options.unix_permissions(metadata.permissions().mode())
}

#[cfg(not(unix))]
fn with_permissions(options: SimpleFileOptions, _metadata: &std::fs::Metadata) -> SimpleFileOptions {
    options
}

/// Converts a relative path into a ZIP entry name with forward slashes.
///
/// # Errors
///
/// Returns [`PackError::InvalidEntryName`] for non UTF-8 or empty paths.
pub fn zip_entry_name(relative: &Path) -> Result<String> {
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()
        .filter(|parts| !parts.is_empty())
        .ok_or_else(|| PackError::InvalidEntryName {
            path: relative.to_path_buf(),
        })?;
    Ok(parts.join("/"))
}
