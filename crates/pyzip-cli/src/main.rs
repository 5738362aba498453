//! pyzip CLI - Command-line utility for packing Python standard library
//! trees into zip archives.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    let result = match &cli.command {
        cli::Commands::Create(args) => {
            commands::create::execute(args, &*formatter, cli.verbose, cli.quiet || cli.json)
        }
        cli::Commands::List(args) => commands::list::execute(args, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    };

    if let Err(err) = result {
        formatter.format_error(&err);
        std::process::exit(1);
    }
}

/// Installs the log subscriber on stderr.
///
/// `RUST_LOG` wins when set. Otherwise `--verbose` shows info events (the
/// skipped paths) and `--quiet` only errors. Colors are used only when
/// stderr is a terminal.
fn init_tracing(verbose: bool, quiet: bool) {
    let default = if verbose {
        "pyzip_core=info"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}
