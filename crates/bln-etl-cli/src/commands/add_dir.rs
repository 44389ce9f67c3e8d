//! Add-dir command implementation

use super::archive_config;
use super::write_mode;
use crate::cli::AddDirArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use bln_etl_core::Archive;
use bln_etl_core::archive::AddDirOptions;

pub fn execute(args: &AddDirArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let archive = add_archive_context(
        Archive::with_config(&args.archive, archive_config(&args.compression)),
        &args.archive,
    )?;

    if !args.dir.is_dir() {
        tracing::warn!(dir = %args.dir.display(), "directory does not exist, nothing to add");
    }

    let options = AddDirOptions::new()
        .with_mode(write_mode(args.overwrite))
        .with_pattern(&args.pattern)
        .with_skip_hidden(!args.include_hidden)
        .with_follow_symlinks(args.follow_symlinks);

    let report = add_archive_context(archive.add_dir(&args.dir, &options), &args.archive)?;

    formatter.format_add_dir_result(&args.archive, &report)
}
