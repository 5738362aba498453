//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use pyzip_core::ArchiveManifest;
use pyzip_core::PackReport;
use serde::Serialize;
use std::io;
use std::io::Write;
use std::path::Path;

pub struct JsonFormatter;

#[derive(Serialize)]
struct PackOutput {
    output_path: String,
    sources_copied: usize,
    files_added: usize,
    directories_added: usize,
    entries_skipped: usize,
    files_compiled: usize,
    compile_failures: usize,
    bytes_written: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    compression_percentage: f64,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl PackOutput {
    fn new(output_path: &Path, report: &PackReport) -> Self {
        Self {
            output_path: output_path.display().to_string(),
            sources_copied: report.sources_copied,
            files_added: report.files_added,
            directories_added: report.directories_added,
            entries_skipped: report.entries_skipped,
            files_compiled: report.files_compiled,
            compile_failures: report.compile_failures,
            bytes_written: report.bytes_written,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            compression_percentage: report.compression_percentage(),
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

#[derive(Serialize)]
struct EntryOutput<'a> {
    name: &'a str,
    is_dir: bool,
    size: u64,
    compressed_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<u32>,
}

#[derive(Serialize)]
struct ManifestOutput<'a> {
    total_entries: usize,
    total_files: usize,
    total_size: u64,
    total_compressed: u64,
    entries: Vec<EntryOutput<'a>>,
}

impl<'a> ManifestOutput<'a> {
    fn new(manifest: &'a ArchiveManifest, with_details: bool) -> Self {
        let entries = manifest
            .entries
            .iter()
            .map(|e| EntryOutput {
                name: &e.name,
                is_dir: e.is_dir,
                size: e.size,
                compressed_size: e.compressed_size,
                mode: if with_details { e.mode } else { None },
            })
            .collect();

        Self {
            total_entries: manifest.entries.len(),
            total_files: manifest.file_count(),
            total_size: manifest.total_size,
            total_compressed: manifest.total_compressed,
            entries,
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_pack_result(&self, output_path: &Path, report: &PackReport) -> Result<()> {
        Self::output(&JsonOutput::success(
            "create",
            PackOutput::new(output_path, report),
        ))
    }

    fn format_manifest_short(&self, manifest: &ArchiveManifest) -> Result<()> {
        Self::output(&JsonOutput::success(
            "list",
            ManifestOutput::new(manifest, false),
        ))
    }

    fn format_manifest_long(&self, manifest: &ArchiveManifest, _human_readable: bool) -> Result<()> {
        Self::output(&JsonOutput::success(
            "list",
            ManifestOutput::new(manifest, true),
        ))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("error", format!("{error:#}"));
        let _ = Self::output(&output);
    }
}
