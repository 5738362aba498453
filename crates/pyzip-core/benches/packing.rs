//! Benchmarks for library packing performance.
//!
//! Measures throughput of the full pack pipeline across compression levels
//! and the cost of the default filter on a stdlib-shaped tree.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use pyzip_core::PackConfig;
use pyzip_core::create_zipfile;
use pyzip_core::creation::EntryFilter;
use pyzip_core::creation::StdlibFilter;
use pyzip_core::creation::filter::NO_PATHS;
use std::ffi::OsString;
use std::fs;
use std::hint::black_box;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

const PACKAGES: usize = 20;
const MODULES_PER_PACKAGE: usize = 25;

/// Creates a tree shaped like a standard library: packages of modules, each
/// with a `__pycache__` directory and some documentation files.
fn create_stdlib_tree(temp: &TempDir) -> PathBuf {
    let root = temp.path().join("python3.13");
    let source = "def function(argument):\n    return argument * 2\n".repeat(20);

    for p in 0..PACKAGES {
        let package = root.join(format!("package_{p:02}"));
        let cache = package.join("__pycache__");
        fs::create_dir_all(&cache).unwrap();
        fs::write(package.join("__init__.py"), "").unwrap();
        fs::write(package.join("README.md"), "docs").unwrap();
        for m in 0..MODULES_PER_PACKAGE {
            fs::write(package.join(format!("module_{m:02}.py")), &source).unwrap();
            fs::write(cache.join(format!("module_{m:02}.cpython-313.pyc")), "x").unwrap();
        }
    }

    root
}

fn bench_pack_levels(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    let root = create_stdlib_tree(&temp);
    let output = temp.path().join("python.zip");

    let mut group = c.benchmark_group("pack_levels");
    group.throughput(Throughput::Elements((PACKAGES * MODULES_PER_PACKAGE) as u64));
    group.sample_size(20);

    for level in [0u8, 1, 6, 9] {
        let config = PackConfig::default().with_compression_level(level);
        group.bench_with_input(BenchmarkId::from_parameter(level), &config, |b, config| {
            b.iter(|| {
                let report = create_zipfile(&[&root], config, &output, None).unwrap();
                black_box(report.bytes_compressed);
            });
        });
    }

    group.finish();
}

fn bench_default_filter(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    let root = create_stdlib_tree(&temp);
    let package = root.join("package_00");
    let names: Vec<OsString> = fs::read_dir(&package)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    let excludes: Vec<String> = (0..50).map(|i| format!("package_{i:02}/module_00.py")).collect();

    c.bench_function("filter_directory", |b| {
        let filter = StdlibFilter::new(&root, &excludes, NO_PATHS, false);
        b.iter(|| black_box(filter.names_to_exclude(Path::new(&package), &names)));
    });
}

criterion_group!(benches, bench_pack_levels, bench_default_filter);
criterion_main!(benches);
