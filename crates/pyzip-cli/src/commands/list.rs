//! List command implementation

use crate::cli::ListArgs;
use crate::error::add_pack_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use pyzip_core::list_archive;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let manifest = add_pack_context(list_archive(&args.archive), &args.archive)?;

    if args.long {
        formatter.format_manifest_long(&manifest, args.human_readable)?;
    } else {
        formatter.format_manifest_short(&manifest)?;
    }

    Ok(())
}
