//! Create command implementation.

use crate::cli::CreateArgs;
use crate::error::add_pack_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use anyhow::bail;
use pyzip_core::NoopProgress;
use pyzip_core::PackConfig;
use pyzip_core::ProgressCallback;
use pyzip_core::api::create_zipfile_with;
use pyzip_core::compile::PythonBackend;

pub fn execute(
    args: &CreateArgs,
    formatter: &dyn OutputFormatter,
    verbose: bool,
    hide_progress: bool,
) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "Output file '{}' already exists\n\
             HINT: Use --force to overwrite.",
            args.output.display()
        );
    }

    let config = PackConfig::default()
        .with_excludes(args.exclude.clone())
        .with_stubs(args.stub.clone())
        .with_compression_level(args.compression_level)
        .with_compile_bytecode(args.compile)
        .with_verbose(verbose);
    let backend = PythonBackend::new(&args.python);

    let mut progress: Box<dyn ProgressCallback> = if !hide_progress && CliProgress::should_show()
    {
        Box::new(CliProgress::new("Packing"))
    } else {
        Box::new(NoopProgress)
    };

    let report = add_pack_context(
        create_zipfile_with(
            &args.sources,
            &config,
            &args.output,
            None,
            &backend,
            progress.as_mut(),
        ),
        &args.output,
    )?;
    drop(progress);

    formatter.format_pack_result(&args.output, &report)
}
