//! Archive packing.
//!
//! Source trees are filtered and merged into a staging directory
//! ([`tree`]), then written to a zip archive ([`zip`]) through an atomic
//! temporary file ([`atomic`]).

pub mod atomic;
pub mod config;
pub mod creator;
pub mod filter;
pub mod report;
pub mod tree;
pub mod zip;

// Re-exports for public API
pub use config::PackConfig;
pub use creator::Packer;
pub use filter::EntryFilter;
pub use filter::StdlibFilter;
pub use report::PackReport;
