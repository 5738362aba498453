//! Builder for packing archives with fluent API.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use crate::NoopProgress;
use crate::PackError;
use crate::ProgressCallback;
use crate::Result;
use crate::compile::BytecodeBackend;
use crate::compile::PythonBackend;
use crate::creation::config::PackConfig;
use crate::creation::filter::EntryFilter;
use crate::creation::report::PackReport;

/// Builder for packing library trees with fluent API.
///
/// # Examples
///
/// ```no_run
/// use pyzip_core::creation::Packer;
///
/// let report = Packer::new()
///     .output("python.zip")
///     .add_source("/opt/python3.13/lib")
///     .add_source("overlay/")
///     .exclude("tkinter")
///     .stub("webbrowser.py")
///     .compression_level(9)
///     .create()?;
///
/// println!("Packed {} files", report.files_added);
/// # Ok::<(), pyzip_core::PackError>(())
/// ```
#[derive(Default)]
pub struct Packer<'a> {
    output_path: Option<PathBuf>,
    sources: Vec<PathBuf>,
    config: PackConfig,
    interpreter: Option<PathBuf>,
    filter: Option<&'a dyn EntryFilter>,
    backend: Option<&'a dyn BytecodeBackend>,
    progress: Option<&'a mut dyn ProgressCallback>,
}

impl fmt::Debug for Packer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packer")
            .field("output_path", &self.output_path)
            .field("sources", &self.sources)
            .field("config", &self.config)
            .field("interpreter", &self.interpreter)
            .field("custom_filter", &self.filter.is_some())
            .field("custom_backend", &self.backend.is_some())
            .finish_non_exhaustive()
    }
}

impl<'a> Packer<'a> {
    /// Creates a new `Packer` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output archive path.
    #[must_use]
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Adds a source directory. Later sources win on collisions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyzip_core::creation::Packer;
    ///
    /// let packer = Packer::new()
    ///     .add_source("cpython/Lib")
    ///     .add_source("overrides/");
    /// ```
    #[must_use]
    pub fn add_source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sources.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds multiple source directories.
    #[must_use]
    pub fn sources<P: AsRef<Path>>(mut self, paths: &[P]) -> Self {
        self.sources
            .extend(paths.iter().map(|p| p.as_ref().to_path_buf()));
        self
    }

    /// Sets the full configuration, replacing earlier settings.
    #[must_use]
    pub fn config(mut self, config: PackConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a path, relative to each source root, that is always left out.
    #[must_use]
    pub fn exclude<S: Into<String>>(mut self, path: S) -> Self {
        self.config.excludes.push(path.into());
        self
    }

    /// Adds a stub path, left out of roots whose name starts with `python3`.
    #[must_use]
    pub fn stub<S: Into<String>>(mut self, path: S) -> Self {
        self.config.stubs.push(path.into());
        self
    }

    /// Sets the compression level (0 stores, 1-9 deflates).
    #[must_use]
    pub fn compression_level(mut self, level: u8) -> Self {
        self.config.compression_level = level;
        self
    }

    /// Sets whether `.py` entries are compiled to `.pyc`.
    #[must_use]
    pub fn compile_bytecode(mut self, compile: bool) -> Self {
        self.config.compile_bytecode = compile;
        self
    }

    /// Sets whether skipped entries are logged.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Sets the interpreter used for bytecode compilation.
    ///
    /// Ignored when a backend is set with [`Packer::backend`].
    #[must_use]
    pub fn interpreter<P: AsRef<Path>>(mut self, interpreter: P) -> Self {
        self.interpreter = Some(interpreter.as_ref().to_path_buf());
        self
    }

    /// Replaces the default filter for every source.
    ///
    /// # Examples
    ///
    /// ```
    /// use pyzip_core::creation::Packer;
    /// use std::collections::BTreeSet;
    /// use std::ffi::OsString;
    /// use std::path::Path;
    ///
    /// let keep_all = |_dir: &Path, _names: &[OsString]| -> BTreeSet<OsString> { BTreeSet::new() };
    /// let packer = Packer::new().filter(&keep_all);
    /// ```
    #[must_use]
    pub fn filter(mut self, filter: &'a dyn EntryFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the bytecode backend.
    #[must_use]
    pub fn backend(mut self, backend: &'a dyn BytecodeBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Sets the progress callback.
    #[must_use]
    pub fn progress(mut self, progress: &'a mut dyn ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Packs the archive.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Output path not set
    /// - No sources provided
    /// - Invalid configuration (compression level above 9)
    /// - Any error from [`crate::api::create_zipfile_with`]
    pub fn create(self) -> Result<PackReport> {
        let output_path = self
            .output_path
            .ok_or_else(|| PackError::InvalidConfiguration {
                reason: "output path not set".to_string(),
            })?;

        if self.sources.is_empty() {
            return Err(PackError::InvalidConfiguration {
                reason: "no source directories provided".to_string(),
            });
        }

        self.config.validate()?;

        let python = match self.interpreter {
            Some(interpreter) => PythonBackend::new(interpreter),
            None => PythonBackend::default(),
        };
        let backend: &dyn BytecodeBackend = match self.backend {
            Some(backend) => backend,
            None => &python,
        };
        let mut noop = NoopProgress;
        let progress: &mut dyn ProgressCallback = match self.progress {
            Some(progress) => progress,
            None => &mut noop,
        };

        crate::api::create_zipfile_with(
            &self.sources,
            &self.config,
            &output_path,
            self.filter,
            backend,
            progress,
        )
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
    use tempfile::TempDir;

    #[test]
    fn test_builder_basic() {
        let packer = Packer::new().output("python.zip").add_source("lib/");

        assert_eq!(packer.output_path, Some(PathBuf::from("python.zip")));
        assert_eq!(packer.sources, vec![PathBuf::from("lib/")]);
    }

    #[test]
    fn test_builder_config_methods() {
        let packer = Packer::new()
            .sources(&["a", "b"])
            .exclude("tkinter")
            .stub("webbrowser.py")
            .compression_level(0)
            .compile_bytecode(true)
            .verbose(true)
            .interpreter("python3.12");

        assert_eq!(packer.sources.len(), 2);
        assert_eq!(packer.config.excludes, vec!["tkinter".to_string()]);
        assert_eq!(packer.config.stubs, vec!["webbrowser.py".to_string()]);
        assert_eq!(packer.config.compression_level, 0);
        assert!(packer.config.compile_bytecode);
        assert!(packer.config.verbose);
        assert_eq!(packer.interpreter, Some(PathBuf::from("python3.12")));
    }

    #[test]
    fn test_builder_no_output_error() {
        let result = Packer::new().add_source("lib/").create();
        assert!(matches!(
            result,
            Err(PackError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_builder_no_sources_error() {
        let result = Packer::new().output("python.zip").create();
        assert!(matches!(
            result,
            Err(PackError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_builder_invalid_level_error() {
        let result = Packer::new()
            .output("python.zip")
            .add_source("lib/")
            .compression_level(11)
            .create();
        assert!(matches!(
            result,
            Err(PackError::InvalidCompressionLevel { level: 11 })
        ));
    }

    #[test]
    fn test_builder_create_with_filter_and_backend() {
        let temp = TempDir::new().unwrap();
        let lib = temp.path().join("lib");
        write_tree(&lib, &[("os.py", "import sys"), ("secret.py", "x")]);
        let output = temp.path().join("python.zip");

        let no_secrets = |_dir: &Path, names: &[OsString]| -> BTreeSet<OsString> {
            names.iter().filter(|n| *n == "secret.py").cloned().collect()
        };
        let report = Packer::new()
            .output(&output)
            .add_source(&lib)
            .filter(&no_secrets)
            .compile_bytecode(true)
            .backend(&FakeBackend)
            .create()
            .unwrap();

        assert_eq!(report.files_compiled, 1);
        let entries = read_zip_entries(&output);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "os.pyc");
        assert_eq!(entries[0].1, b"PYC:import sys");
    }
}
