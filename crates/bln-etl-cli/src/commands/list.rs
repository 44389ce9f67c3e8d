//! List command implementation

use crate::cli::ListArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use bln_etl_core::Archive;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let entries = add_archive_context(Archive::new(&args.archive).list(), &args.archive)?;
    formatter.format_listing(&args.archive, &entries)
}
