//! Example: Packing a library tree with pyzip-core
//!
//! Run with: `cargo run --example pack_stdlib -- <LIB_DIR> [OUTPUT]`

use pyzip_core::PackConfig;
use pyzip_core::Packer;
use pyzip_core::create_zipfile;
use pyzip_core::list_archive;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let lib = args.next().ok_or("usage: pack_stdlib <LIB_DIR> [OUTPUT]")?;
    let output = args.next().unwrap_or_else(|| "python.zip".to_string());

    // Example 1: Function API with default filtering
    println!("Example 1: create_zipfile");
    let config = PackConfig::default()
        .with_excludes(vec!["test".to_string(), "tkinter".to_string()])
        .with_stubs(vec!["webbrowser.py".to_string()]);
    let report = create_zipfile(&[&lib], &config, &output, None)?;
    println!(
        "  Packed {} files, skipped {} entries",
        report.files_added, report.entries_skipped
    );
    println!(
        "  Compression ratio: {:.1}%",
        report.compression_percentage()
    );

    // Example 2: Builder with maximum compression
    println!("\nExample 2: Packer builder");
    let report = Packer::new()
        .output(&output)
        .add_source(&lib)
        .exclude("test")
        .compression_level(9)
        .create()?;
    println!("  Archive is {} bytes", report.bytes_compressed);

    let manifest = list_archive(&output)?;
    for entry in manifest.entries.iter().take(5) {
        println!("  {:>8}  {}", entry.size, entry.name);
    }

    Ok(())
}
