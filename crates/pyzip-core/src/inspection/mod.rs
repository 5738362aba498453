//! Inspection of packed archives without extraction.
//!
//! # Examples
//!
//! ```no_run
//! use pyzip_core::list_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = list_archive("python.zip")?;
//! println!("Archive contains {} files", manifest.file_count());
//! # Ok(())
//! # }
//! ```

pub mod list;
pub mod manifest;

pub use list::list_archive;
pub use manifest::ArchiveEntry;
pub use manifest::ArchiveManifest;
