//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use pyzip_core::compile::DEFAULT_INTERPRETER;
use pyzip_core::creation::config::DEFAULT_COMPRESSION_LEVEL;
use pyzip_core::creation::config::MAX_COMPRESSION_LEVEL;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pyzip")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (logs every skipped path)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack library directories into a zip archive
    Create(CreateArgs),
    /// List archive contents without extraction
    List(ListArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct CreateArgs {
    /// Library directories to pack; later ones override earlier ones
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<PathBuf>,

    /// Output archive file path
    #[arg(short, long, value_name = "OUTPUT", default_value = "python.zip")]
    pub output: PathBuf,

    /// Path relative to each source to leave out (can be repeated)
    #[arg(long = "exclude", short = 'x', value_name = "PATH")]
    pub exclude: Vec<String>,

    /// Path with a runtime-provided implementation, left out of python3* roots
    /// (can be repeated)
    #[arg(long = "stub", value_name = "PATH")]
    pub stub: Vec<String>,

    /// Compression level (0 stores, 1-9 deflates)
    #[arg(
        short = 'l',
        long,
        default_value_t = DEFAULT_COMPRESSION_LEVEL,
        value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_COMPRESSION_LEVEL))
    )]
    pub compression_level: u8,

    /// Replace .py sources with compiled .pyc files
    #[arg(long)]
    pub compile: bool,

    /// Interpreter used by --compile
    #[arg(long, value_name = "INTERPRETER", default_value = DEFAULT_INTERPRETER)]
    pub python: PathBuf,

    /// Overwrite output file if exists
    #[arg(short = 'f', long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show detailed entry information
    #[arg(short, long)]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
