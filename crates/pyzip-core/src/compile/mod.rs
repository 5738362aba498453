//! Bytecode compilation of packed archives.
//!
//! [`compile_archive`] rewrites an archive so that every `.py` entry is
//! replaced by a legacy-layout `.pyc` entry (`pkg/mod.py` becomes
//! `pkg/mod.pyc`). The compilation itself is delegated to a
//! [`BytecodeBackend`]; [`PythonBackend`] drives an external interpreter so the
//! bytecode matches the runtime that will import it.

mod python;

pub use python::DEFAULT_INTERPRETER;
pub use python::PythonBackend;

use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::creation::atomic::write_atomic;
use crate::creation::zip::entry_options;
use std::collections::HashSet;
use std::fs;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use zip::ZipArchive;
use zip::ZipWriter;

/// Compiles Python sources in a directory tree.
///
/// For every `<name>.py` below `dir` that compiles, the backend must leave a
/// `<name>.pyc` next to it. Sources that fail to compile simply get no
/// `.pyc`; they are kept as source by [`compile_archive`].
pub trait BytecodeBackend {
    /// Compiles every `.py` file below `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend itself cannot run. Per-file
    /// failures are reported by the absence of the `.pyc` file.
    fn compile_dir(&self, dir: &Path) -> Result<()>;
}

/// Outcome of one archive compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileStats {
    /// `.py` entries replaced by `.pyc` entries.
    pub compiled: usize,
    /// `.py` entries kept as source because they did not compile.
    pub failed: Vec<String>,
}

/// Compiles the `.py` entries of `input` and writes the result to `output`.
///
/// `input` and `output` may be the same path. Entry order is preserved and
/// every entry is rewritten at `level`. Scratch files live in a temporary
/// directory that is removed before returning. When `keep` is false and the
/// paths differ, `input` is deleted after `output` is written.
///
/// # Examples
///
/// ```no_run
/// use pyzip_core::compile::PythonBackend;
/// use pyzip_core::compile::compile_archive;
/// use std::path::Path;
///
/// let archive = Path::new("python.zip");
/// let stats = compile_archive(archive, archive, 6, &PythonBackend::default(), false)?;
/// println!("compiled {} modules", stats.compiled);
/// # Ok::<(), pyzip_core::PackError>(())
/// ```
///
/// # Errors
///
/// Returns an error if `input` is not a readable zip, the backend cannot
/// run, or `output` cannot be written.
pub fn compile_archive(
    input: &Path,
    output: &Path,
    level: u8,
    backend: &dyn BytecodeBackend,
    keep: bool,
) -> Result<CompileStats> {
    let mut archive = ZipArchive::new(File::open(input)?)?;
    let scratch = TempDir::new()?;

    let sources = extract_sources(&mut archive, scratch.path())?;
    if !sources.is_empty() {
        backend.compile_dir(scratch.path())?;
    }

    let stats = write_atomic(output, |file| {
        rewrite_entries(&mut archive, &mut *file, scratch.path(), level)
    })?;

    for name in &stats.failed {
        tracing::warn!("could not compile {name}, keeping source");
    }
    tracing::info!(
        compiled = stats.compiled,
        failed = stats.failed.len(),
        "compiled archive {}",
        output.display()
    );

    if !keep && input != output {
        fs::remove_file(input)?;
    }

    Ok(stats)
}

/// Writes every `.py` entry into `scratch`, returning the entry names.
fn extract_sources(archive: &mut ZipArchive<File>, scratch: &Path) -> Result<Vec<String>> {
    let mut buffer = CopyBuffer::new();
    let mut sources = Vec::new();

    for idx in 0..archive.len() {
        let mut entry = archive.by_index(idx)?;
        if entry.is_dir() || !is_source(entry.name()) {
            continue;
        }
        let Some(relative) = entry.enclosed_name() else {
            tracing::warn!("not compiling unsafe entry name {}", entry.name());
            continue;
        };

        let target = scratch.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        copy_with_buffer(&mut entry, &mut out, &mut buffer)?;
        sources.push(entry.name().to_string());
    }

    Ok(sources)
}

fn rewrite_entries(
    archive: &mut ZipArchive<File>,
    file: &mut File,
    scratch: &Path,
    level: u8,
) -> Result<CompileStats> {
    let mut zip = ZipWriter::new(file);
    let base = entry_options(level);
    let mut buffer = CopyBuffer::new();
    let mut stats = CompileStats::default();
    let superseded = superseded_entries(archive, scratch)?;

    for idx in 0..archive.len() {
        let mut entry = archive.by_index(idx)?;
        let name = entry.name().to_string();
        if superseded.contains(&name) {
            tracing::debug!("dropping {name}, replaced by freshly compiled bytecode");
            continue;
        }
        let options = match entry.unix_mode() {
            Some(mode) => base.unix_permissions(mode),
            None => base,
        };

        if entry.is_dir() {
            zip.add_directory(name, options)?;
            continue;
        }

        if is_source(&name)
            && let Some(compiled) = compiled_path(entry.enclosed_name().as_deref(), scratch)
        {
            let mut pyc = File::open(&compiled)?;
            let size = pyc.metadata()?.len();
            zip.start_file(
                format!("{name}c"),
                options.large_file(size >= u64::from(u32::MAX)),
            )?;
            copy_with_buffer(&mut pyc, &mut zip, &mut buffer)?;
            stats.compiled += 1;
            continue;
        }

        if is_source(&name) {
            stats.failed.push(name.clone());
        }
        let large = entry.size() >= u64::from(u32::MAX);
        zip.start_file(name, options.large_file(large))?;
        copy_with_buffer(&mut entry, &mut zip, &mut buffer)?;
    }

    zip.finish()?;
    Ok(stats)
}

/// Names of existing `.pyc` entries that a compiled `.py` sibling replaces.
fn superseded_entries(archive: &mut ZipArchive<File>, scratch: &Path) -> Result<HashSet<String>> {
    let names: HashSet<String> = archive.file_names().map(str::to_string).collect();
    let mut superseded = HashSet::new();

    for idx in 0..archive.len() {
        let entry = archive.by_index_raw(idx)?;
        let name = entry.name();
        if entry.is_dir() || !is_source(name) {
            continue;
        }
        let compiled_name = format!("{name}c");
        if names.contains(&compiled_name)
            && compiled_path(entry.enclosed_name().as_deref(), scratch).is_some()
        {
            superseded.insert(compiled_name);
        }
    }

    Ok(superseded)
}

fn is_source(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext == "py")
}

/// Location of the compiled file for an extracted source, if it exists.
fn compiled_path(relative: Option<&Path>, scratch: &Path) -> Option<PathBuf> {
    let mut compiled = scratch.join(relative?).into_os_string();
    compiled.push("c");
    let compiled = PathBuf::from(compiled);
    compiled.is_file().then_some(compiled)
}
