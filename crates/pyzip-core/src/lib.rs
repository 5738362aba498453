//! Packing of Python standard library trees into a single zip archive.
//!
//! `pyzip-core` merges one or more library directories into one zip that a
//! Python runtime can import from. The default filter drops caches, build
//! artifacts, packaging metadata, type stubs, unneeded codecs and any paths
//! the caller excludes. Optionally, `.py` entries are replaced by compiled
//! `.pyc` files.
//!
//! # Examples
//!
//! ```no_run
//! use pyzip_core::PackConfig;
//! use pyzip_core::create_zipfile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PackConfig::default()
//!     .with_excludes(vec!["test".to_string(), "tkinter".to_string()])
//!     .with_stubs(vec!["webbrowser.py".to_string()]);
//! let report = create_zipfile(&["/opt/python3.13/lib"], &config, "python.zip", None)?;
//! println!("Packed {} files", report.files_added);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod compile;
pub mod copy;
pub mod creation;
pub mod error;
pub mod inspection;
pub mod report;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export main API types
pub use api::create_zipfile;
pub use creation::EntryFilter;
pub use creation::PackConfig;
pub use creation::PackReport;
pub use creation::Packer;
pub use error::PackError;
pub use error::Result;
pub use inspection::ArchiveManifest;
pub use inspection::list_archive;
pub use report::NoopProgress;
pub use report::ProgressCallback;
