//! Filtered merge-copy of a directory tree.
//!
//! Every visited directory is listed once, its entry names are handed to the
//! [`EntryFilter`], and only the survivors are copied. Excluding a directory
//! name prunes its whole subtree without descending into it.

use crate::Result;
use crate::creation::filter::EntryFilter;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

/// Counters collected while copying a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Files copied.
    pub files: usize,
    /// Directories created or merged into.
    pub directories: usize,
    /// Entries the filter excluded.
    pub skipped: usize,
}

/// Copies `src` into `dst`, consulting `filter` at every directory level.
///
/// `dst` may already exist and hold content from an earlier copy; files with
/// the same relative path are overwritten. Symlinks are followed, so the
/// archive receives the content they point at.
///
/// # Examples
///
/// ```no_run
/// use pyzip_core::creation::filter::NO_PATHS;
/// use pyzip_core::creation::filter::StdlibFilter;
/// use pyzip_core::creation::tree::copy_tree;
/// use std::path::Path;
///
/// let root = Path::new("/opt/python3.13");
/// let filter = StdlibFilter::new(root, &["tkinter"], NO_PATHS, false);
/// let stats = copy_tree(root, Path::new("/tmp/staging"), &filter)?;
/// println!("copied {} files", stats.files);
/// # Ok::<(), pyzip_core::PackError>(())
/// ```
///
/// # Errors
///
/// Returns an error if a directory cannot be listed, an entry's metadata
/// cannot be read (for example a dangling symlink), or a copy fails.
pub fn copy_tree(src: &Path, dst: &Path, filter: &dyn EntryFilter) -> Result<CopyStats> {
    let mut stats = CopyStats::default();
    copy_dir(src, dst, filter, &mut stats)?;
    Ok(stats)
}

fn copy_dir(src: &Path, dst: &Path, filter: &dyn EntryFilter, stats: &mut CopyStats) -> Result<()> {
    fs::create_dir_all(dst).map_err(|e| with_path(e, dst))?;
    stats.directories += 1;

    let names = list_names(src)?;
    let excluded = filter.names_to_exclude(src, &names);
    if !excluded.is_empty() {
        tracing::debug!(
            dir = %src.display(),
            excluded = excluded.len(),
            "filtered directory entries"
        );
    }

    for name in names {
        if excluded.contains(&name) {
            stats.skipped += 1;
            continue;
        }

        let from = src.join(&name);
        let to = dst.join(&name);
        let metadata = fs::metadata(&from).map_err(|e| with_path(e, &from))?;

        if metadata.is_dir() {
            copy_dir(&from, &to, filter, stats)?;
        } else {
            fs::copy(&from, &to).map_err(|e| with_path(e, &from))?;
            stats.files += 1;
        }
    }

    Ok(())
}

/// Lists entry names of a directory in sorted order.
fn list_names(dir: &Path) -> Result<Vec<OsString>> {
    let mut names = fs::read_dir(dir)
        .map_err(|e| with_path(e, dir))?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| with_path(e, dir))?;
    names.sort();
    Ok(names)
}

fn with_path(err: io::Error, path: &Path) -> io::Error {
    io::Error::new(err.kind(), format!("{}: {err}", path.display()))
}
