//! High-level public API for packing library trees.

use std::fs;
use std::path::Path;
use std::time::Instant;

use tempfile::TempDir;

use crate::NoopProgress;
use crate::PackError;
use crate::ProgressCallback;
use crate::Result;
use crate::compile::BytecodeBackend;
use crate::compile::PythonBackend;
use crate::compile::compile_archive;
use crate::creation::PackConfig;
use crate::creation::PackReport;
use crate::creation::filter::EntryFilter;
use crate::creation::filter::StdlibFilter;
use crate::creation::tree::copy_tree;
use crate::creation::zip::write_zip;

/// Packs one or more library directories into a single zip archive.
///
/// Sources are merged in order into a temporary staging directory, so a file
/// from a later source replaces the same relative path from an earlier one.
/// Without a custom `filter`, each source gets a [`StdlibFilter`] rooted at
/// that source and built from `config.excludes` and `config.stubs`. A custom
/// filter replaces the default for every source and the exclude and stub
/// lists are then ignored.
///
/// When `config.compile_bytecode` is set, `.py` entries are compiled with
/// [`PythonBackend::default`] before the archive is moved to `output`.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid (compression level above 9)
/// - A source is missing or not a directory
/// - Copying, writing or compiling fails
///
/// All source checks happen before any output is written. The archive itself
/// is written through a temporary file, so a failure never leaves a partial
/// archive at `output`.
///
/// # Examples
///
/// ```no_run
/// use pyzip_core::PackConfig;
/// use pyzip_core::create_zipfile;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PackConfig::default().with_excludes(vec!["tkinter".to_string()]);
/// let report = create_zipfile(&["/opt/python3.13/lib"], &config, "python.zip", None)?;
/// println!("Packed {} files", report.files_added);
/// # Ok(())
/// # }
/// ```
pub fn create_zipfile<P: AsRef<Path>, Q: AsRef<Path>>(
    sources: &[P],
    config: &PackConfig,
    output: Q,
    filter: Option<&dyn EntryFilter>,
) -> Result<PackReport> {
    create_zipfile_with(
        sources,
        config,
        output,
        filter,
        &PythonBackend::default(),
        &mut NoopProgress,
    )
}

/// Packs library directories with an explicit bytecode backend and progress
/// reporting.
///
/// Behaves like [`create_zipfile`]. `backend` is only used when
/// `config.compile_bytecode` is set; `progress` receives one event per
/// archive entry.
///
/// # Errors
///
/// Same as [`create_zipfile`].
///
/// # Examples
///
/// ```no_run
/// use pyzip_core::NoopProgress;
/// use pyzip_core::PackConfig;
/// use pyzip_core::api::create_zipfile_with;
/// use pyzip_core::compile::PythonBackend;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PackConfig::default().with_compile_bytecode(true);
/// let backend = PythonBackend::new("/usr/bin/python3.13");
/// let report = create_zipfile_with(
///     &["lib"],
///     &config,
///     "python.zip",
///     None,
///     &backend,
///     &mut NoopProgress,
/// )?;
/// println!("Compiled {} modules", report.files_compiled);
/// # Ok(())
/// # }
/// ```
pub fn create_zipfile_with<P: AsRef<Path>, Q: AsRef<Path>>(
    sources: &[P],
    config: &PackConfig,
    output: Q,
    filter: Option<&dyn EntryFilter>,
    backend: &dyn BytecodeBackend,
    progress: &mut dyn ProgressCallback,
) -> Result<PackReport> {
    let start = Instant::now();
    let output = output.as_ref();

    config.validate()?;
    for source in sources {
        check_source(source.as_ref())?;
    }

    let mut report = PackReport::new();
    let work = TempDir::new()?;
    let staging = work.path().join("staging");
    fs::create_dir(&staging)?;

    for source in sources {
        let source = source.as_ref();
        let stats = match filter {
            Some(custom) => copy_tree(source, &staging, custom)?,
            None => {
                let default =
                    StdlibFilter::new(source, &config.excludes, &config.stubs, config.verbose);
                copy_tree(source, &staging, &default)?
            }
        };

        tracing::debug!(
            source = %source.display(),
            files = stats.files,
            skipped = stats.skipped,
            "staged source"
        );
        report.sources_copied += 1;
        report.files_staged += stats.files;
        report.directories_staged += stats.directories;
        report.entries_skipped += stats.skipped;
    }

    // When compiling, the plain archive stays in the work directory so that
    // `output` only ever receives the compiled result.
    let archive = if config.compile_bytecode {
        work.path().join("uncompiled.zip")
    } else {
        output.to_path_buf()
    };

    let written = write_zip(&archive, &staging, config.compression_level, progress)?;
    report.files_added = written.files;
    report.directories_added = written.directories;
    report.bytes_written = written.bytes_written;
    report.bytes_compressed = written.bytes_compressed;

    if config.compile_bytecode {
        let stats = compile_archive(&archive, output, config.compression_level, backend, true)?;
        report.files_compiled = stats.compiled;
        report.compile_failures = stats.failed.len();
        for name in stats.failed {
            report.add_warning(format!("could not compile {name}, kept as source"));
        }
        report.bytes_compressed = output.metadata()?.len();
    }

    report.duration = start.elapsed();
    tracing::info!(
        files = report.files_added,
        compiled = report.files_compiled,
        bytes = report.bytes_compressed,
        "wrote {}",
        output.display()
    );

    Ok(report)
}

fn check_source(path: &Path) -> Result<()> {
    match path.metadata() {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PackError::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(PackError::SourceNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::FakeBackend;
    use crate::test_utils::read_zip_entries;
    use crate::test_utils::write_tree;
    use std::collections::BTreeSet;
    use std::ffi::OsString;

    fn entry_names(path: &Path) -> Vec<String> {
        read_zip_entries(path).into_iter().map(|(n, _)| n).collect()
    }

    #[test]
    fn test_create_zipfile_basic() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("lib");
        write_tree(
            &lib,
            &[
                ("os.py", "import sys"),
                ("json/__init__.py", "# json"),
                ("json/__pycache__/x.cpython-313.pyc", "junk"),
                ("LICENSE.txt", "license"),
                ("typing.pyi", "stub"),
            ],
        );
        let output = temp.path().join("python.zip");

        let report = create_zipfile(&[&lib], &PackConfig::default(), &output, None).unwrap();

        assert_eq!(
            entry_names(&output),
            vec!["json/", "json/__init__.py", "os.py"]
        );
        assert_eq!(report.sources_copied, 1);
        assert_eq!(report.files_added, 2);
        assert_eq!(report.directories_added, 1);
        assert_eq!(report.entries_skipped, 3);
        assert_eq!(report.files_compiled, 0);
    }

    #[test]
    fn test_create_zipfile_later_source_wins() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first");
        let second = temp.path().join("second");
        write_tree(&first, &[("site.py", "first"), ("a.py", "a")]);
        write_tree(&second, &[("site.py", "second"), ("b.py", "b")]);
        let output = temp.path().join("python.zip");

        create_zipfile(&[&first, &second], &PackConfig::default(), &output, None).unwrap();

        let entries = read_zip_entries(&output);
        let names: Vec<_> = entries.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["a.py", "b.py", "site.py"]);
        assert_eq!(entries[2].1, b"second");
    }

    #[test]
    fn test_create_zipfile_custom_filter_overrides_lists() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("lib");
        write_tree(&lib, &[("keep.py", "k"), ("drop.py", "d"), ("LICENSE", "l")]);
        let output = temp.path().join("python.zip");

        let only_drop = |_dir: &Path, names: &[OsString]| -> BTreeSet<OsString> {
            names.iter().filter(|n| *n == "drop.py").cloned().collect()
        };
        let config = PackConfig::default().with_excludes(vec!["keep.py".to_string()]);

        create_zipfile(&[&lib], &config, &output, Some(&only_drop)).unwrap();

        assert_eq!(entry_names(&output), vec!["LICENSE", "keep.py"]);
    }

    #[test]
    fn test_create_zipfile_missing_source_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("lib");
        write_tree(&lib, &[("os.py", "x")]);
        let output = temp.path().join("python.zip");

        let result = create_zipfile(
            &[lib, temp.path().join("missing")],
            &PackConfig::default(),
            &output,
            None,
        );

        assert!(matches!(result, Err(PackError::SourceNotFound { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_create_zipfile_file_source_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("os.py");
        fs::write(&file, "x").unwrap();

        let result = create_zipfile(
            &[&file],
            &PackConfig::default(),
            temp.path().join("python.zip"),
            None,
        );
        assert!(matches!(result, Err(PackError::NotADirectory { .. })));
    }

    #[test]
    fn test_create_zipfile_invalid_level_rejected() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("python.zip");
        let config = PackConfig::default().with_compression_level(10);

        let result = create_zipfile(&[temp.path()], &config, &output, None);
        assert!(matches!(
            result,
            Err(PackError::InvalidCompressionLevel { level: 10 })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_create_zipfile_compiler_error_writes_nothing() {
        struct BrokenBackend;
        impl BytecodeBackend for BrokenBackend {
            fn compile_dir(&self, _dir: &Path) -> Result<()> {
                Err(PackError::Compiler {
                    reason: "no interpreter".to_string(),
                })
            }
        }

        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("lib");
        write_tree(&lib, &[("os.py", "import sys")]);
        let output = temp.path().join("python.zip");
        let config = PackConfig::default().with_compile_bytecode(true);

        let result = create_zipfile_with(
            &[&lib],
            &config,
            &output,
            None,
            &BrokenBackend,
            &mut NoopProgress,
        );

        assert!(matches!(result, Err(PackError::Compiler { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_create_zipfile_with_compile() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("lib");
        write_tree(
            &lib,
            &[
                ("os.py", "import sys"),
                ("broken.py", "SyntaxError"),
                ("data.txt", "d"),
            ],
        );
        let output = temp.path().join("python.zip");
        let config = PackConfig::default().with_compile_bytecode(true);

        let report = create_zipfile_with(
            &[&lib],
            &config,
            &output,
            None,
            &FakeBackend,
            &mut NoopProgress,
        )
        .unwrap();

        assert_eq!(
            entry_names(&output),
            vec!["broken.py", "data.txt", "os.pyc"]
        );
        assert_eq!(report.files_compiled, 1);
        assert_eq!(report.compile_failures, 1);
        assert!(report.has_warnings());

        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 2, "unexpected files: {leftovers:?}");
    }

    #[test]
    fn test_create_zipfile_compile_with_stale_bytecode_in_source() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("lib");
        write_tree(&lib, &[("mod.py", "import sys"), ("mod.pyc", "stale")]);
        let output = temp.path().join("python.zip");
        let config = PackConfig::default().with_compile_bytecode(true);

        let report = create_zipfile_with(
            &[&lib],
            &config,
            &output,
            None,
            &FakeBackend,
            &mut NoopProgress,
        )
        .unwrap();

        assert_eq!(report.files_compiled, 1);
        let entries = read_zip_entries(&output);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "mod.pyc");
        assert_eq!(entries[0].1, b"PYC:import sys");
    }
}
