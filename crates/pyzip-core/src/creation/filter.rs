//! Path filtering logic for library packing.
//!
//! The copy step asks an [`EntryFilter`] which entries of every visited
//! directory must be left out. [`StdlibFilter`] is the default: it drops build
//! artifacts, packaging metadata and documentation, trims the `encodings`
//! package down to the codecs the runtime needs, and removes caller-supplied
//! excludes and stubs.

use std::collections::BTreeSet;
use std::collections::HashSet;
use std::ffi::OsStr;
use std::ffi::OsString;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Directory names that are always pruned.
const SKIPPED_DIRS: &[&str] = &["__pycache__", "dist"];

/// Directory name suffixes of packaging metadata.
const SKIPPED_DIR_SUFFIXES: &[&str] = &[".egg-info", ".dist-info"];

/// File names that are always dropped.
const SKIPPED_FILES: &[&str] = &["LICENSE", "LICENSE.txt", "setup.py", ".gitignore"];

/// File extensions that are always dropped.
const SKIPPED_EXTENSIONS: &[&str] = &["pyi", "toml", "cfg", "md", "rst"];

/// Entries kept inside an `encodings` directory. Everything else is dropped.
const RETAINED_ENCODINGS: &[&str] = &["__init__.py", "aliases.py", "utf_8.py"];

/// Root directory name prefix that marks a runtime build of the standard
/// library. Stubs are only removed from roots carrying it.
pub const STUB_ROOT_PREFIX: &str = "python3";

/// Empty exclude or stub list for [`StdlibFilter::new`].
pub const NO_PATHS: &[&str] = &[];

/// Decides which entries of a directory are excluded from the copy.
///
/// Implemented by [`StdlibFilter`] and by any closure with the signature
/// `Fn(&Path, &[OsString]) -> BTreeSet<OsString>`.
///
/// # Examples
///
/// ```
/// use pyzip_core::creation::filter::EntryFilter;
/// use std::collections::BTreeSet;
/// use std::ffi::OsString;
/// use std::path::Path;
///
/// let no_tests = |_dir: &Path, names: &[OsString]| -> BTreeSet<OsString> {
///     names.iter().filter(|n| *n == "test").cloned().collect()
/// };
///
/// let names = vec![OsString::from("os.py"), OsString::from("test")];
/// let excluded = no_tests.names_to_exclude(Path::new("lib"), &names);
/// assert_eq!(excluded.len(), 1);
/// ```
pub trait EntryFilter {
    /// Returns the subset of `names` (entries of `dir`) to exclude.
    fn names_to_exclude(&self, dir: &Path, names: &[OsString]) -> BTreeSet<OsString>;
}

impl<F> EntryFilter for F
where
    F: Fn(&Path, &[OsString]) -> BTreeSet<OsString>,
{
    fn names_to_exclude(&self, dir: &Path, names: &[OsString]) -> BTreeSet<OsString> {
        self(dir, names)
    }
}

/// Whether a path is a file or a directory, as seen by the skip rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Regular file (or symlink to one).
    File,
    /// Directory (or symlink to one).
    Directory,
    /// Anything else, including paths that do not exist.
    Other,
}

impl PathKind {
    /// Inspects the filesystem, following symlinks.
    #[must_use]
    pub fn of(path: &Path) -> Self {
        if path.is_dir() {
            Self::Directory
        } else if path.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// Default filter used when packing a standard library tree.
///
/// The exclusion set is resolved once, when the filter is built, against the
/// root directory it was built for.
///
/// # Examples
///
/// ```no_run
/// use pyzip_core::creation::filter::EntryFilter;
/// use pyzip_core::creation::filter::StdlibFilter;
/// use std::path::Path;
///
/// let filter = StdlibFilter::new(
///     Path::new("/opt/python3.13"),
///     &["sqlite3".to_string()],
///     &["webbrowser.py".to_string()],
///     false,
/// );
/// let excluded = filter.names_to_exclude(Path::new("/opt/python3.13"), &[]);
/// assert!(excluded.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct StdlibFilter {
    excluded: HashSet<PathBuf>,
    verbose: bool,
}

impl StdlibFilter {
    /// Builds the filter for `root`.
    ///
    /// `excludes` are always removed. `stubs` are removed only when the final
    /// segment of `root` starts with [`STUB_ROOT_PREFIX`]. Both are relative
    /// to `root`. With `verbose`, every excluded entry is logged.
    #[must_use]
    pub fn new<E, T>(root: &Path, excludes: &[E], stubs: &[T], verbose: bool) -> Self
    where
        E: AsRef<str>,
        T: AsRef<str>,
    {
        let mut excluded: HashSet<PathBuf> = excludes
            .iter()
            .map(|rel| resolve_path(&root.join(rel.as_ref())))
            .collect();

        if has_stub_prefix(root) {
            excluded.extend(stubs.iter().map(|rel| resolve_path(&root.join(rel.as_ref()))));
        }

        Self { excluded, verbose }
    }

    /// Returns `true` if the resolved `path` is in the exclusion set.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.excluded.contains(path)
    }

    /// Number of resolved paths in the exclusion set.
    #[must_use]
    pub fn excluded_len(&self) -> usize {
        self.excluded.len()
    }
}

impl EntryFilter for StdlibFilter {
    fn names_to_exclude(&self, dir: &Path, names: &[OsString]) -> BTreeSet<OsString> {
        let dir = resolve_path(dir);

        if should_skip(&dir) {
            return names.iter().cloned().collect();
        }

        if dir.file_name() == Some(OsStr::new("encodings")) {
            return names
                .iter()
                .filter(|name| {
                    !RETAINED_ENCODINGS
                        .iter()
                        .any(|keep| name.as_os_str() == OsStr::new(keep))
                })
                .cloned()
                .collect();
        }

        let mut excluded = BTreeSet::new();
        for name in names {
            let full = dir.join(name);
            if should_skip(&full) || self.excluded.contains(&full) {
                if self.verbose {
                    tracing::info!("Skipping {}", full.display());
                }
                excluded.insert(name.clone());
            }
        }
        excluded
    }
}

/// Checks if a path is dropped by the generic skip rule.
///
/// Looks at the file name and at whether the path is a file or a directory.
///
/// # Examples
///
/// ```no_run
/// use pyzip_core::creation::filter;
/// use std::path::Path;
///
/// assert!(filter::should_skip(Path::new("lib/__pycache__")));
/// assert!(!filter::should_skip(Path::new("lib/os.py")));
/// ```
#[must_use]
pub fn should_skip(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(OsStr::to_str) else {
        return false;
    };
    skip_by_name(name, PathKind::of(path))
}

/// Pure form of [`should_skip`] for a known entry kind.
///
/// # Examples
///
/// ```
/// use pyzip_core::creation::filter::PathKind;
/// use pyzip_core::creation::filter::skip_by_name;
///
/// assert!(skip_by_name("dist", PathKind::Directory));
/// assert!(!skip_by_name("dist", PathKind::File));
/// assert!(skip_by_name("typing.pyi", PathKind::File));
/// assert!(skip_by_name("six-1.16.dist-info", PathKind::Directory));
/// ```
#[must_use]
pub fn skip_by_name(name: &str, kind: PathKind) -> bool {
    match kind {
        PathKind::Directory => {
            SKIPPED_DIRS.contains(&name)
                || SKIPPED_DIR_SUFFIXES
                    .iter()
                    .any(|suffix| name.ends_with(suffix))
        }
        PathKind::File => {
            SKIPPED_FILES.contains(&name)
                || Path::new(name)
                    .extension()
                    .and_then(OsStr::to_str)
                    .is_some_and(|ext| SKIPPED_EXTENSIONS.contains(&ext))
        }
        PathKind::Other => false,
    }
}

/// Returns `true` if the last segment of `root` starts with
/// [`STUB_ROOT_PREFIX`].
#[must_use]
pub fn has_stub_prefix(root: &Path) -> bool {
    root.file_name()
        .and_then(OsStr::to_str)
        .is_some_and(|name| name.starts_with(STUB_ROOT_PREFIX))
}

/// Resolves a path to an absolute form suitable for set membership.
///
/// Existing paths are canonicalized (symlinks followed). Paths that do not
/// exist are made absolute against the current directory and normalized
/// lexically.
#[must_use]
pub fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    normalize_lexically(&absolute)
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
