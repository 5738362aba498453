//! Archive listing implementation.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::Result;
use crate::inspection::manifest::ArchiveEntry;
use crate::inspection::manifest::ArchiveManifest;

/// Lists archive contents without extracting.
///
/// Entries are returned in the order of the central directory. No files are
/// written to disk.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a valid zip.
///
/// # Examples
///
/// ```no_run
/// use pyzip_core::list_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let manifest = list_archive("python.zip")?;
/// for entry in &manifest.entries {
///     println!("{}: {} bytes", entry.name, entry.size);
/// }
/// # Ok(())
/// # }
/// ```
pub fn list_archive<P: AsRef<Path>>(archive_path: P) -> Result<ArchiveManifest> {
    let file = File::open(archive_path.as_ref())?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))?;
    let mut manifest = ArchiveManifest::new();

    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i)?;
        manifest.add_entry(ArchiveEntry {
            name: entry.name().to_string(),
            is_dir: entry.is_dir(),
            size: entry.size(),
            compressed_size: entry.compressed_size(),
            mode: entry.unix_mode(),
        });
    }

    Ok(manifest)
}
