//! Test helpers for building source trees and inspecting archives.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use crate::Result;
use crate::compile::BytecodeBackend;
use std::fs;
use std::io::Cursor;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;

/// Creates an in-memory ZIP archive from `(path, content)` pairs.
///
/// Entries are stored uncompressed with mode 0o644.
#[must_use]
pub fn create_test_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    use zip::write::SimpleFileOptions;
    use zip::write::ZipWriter;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored)
        .unix_permissions(0o644);

    for (path, data) in entries {
        zip.start_file(*path, options).unwrap();
        zip.write_all(data.as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Reads every entry of a ZIP file as `(name, content)` in archive order.
#[must_use]
pub fn read_zip_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|idx| {
            let mut entry = archive.by_index(idx).unwrap();
            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();
            (entry.name().to_string(), content)
        })
        .collect()
}

/// Writes `(relative path, content)` pairs below `root`, creating parents.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// Backend that "compiles" by prefixing the source with `PYC:`.
///
/// Sources containing `SyntaxError` are left uncompiled.
#[derive(Debug, Default)]
pub struct FakeBackend;

impl BytecodeBackend for FakeBackend {
    fn compile_dir(&self, dir: &Path) -> Result<()> {
        for entry in WalkDir::new(dir) {
            let entry = entry.unwrap();
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "py") {
                continue;
            }
            let source = fs::read_to_string(path)?;
            if source.contains("SyntaxError") {
                continue;
            }
            fs::write(path.with_extension("pyc"), format!("PYC:{source}"))?;
        }
        Ok(())
    }
}
