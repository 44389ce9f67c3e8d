//! Add command implementation

use super::archive_config;
use super::write_mode;
use crate::cli::AddArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use bln_etl_core::Archive;
use bln_etl_core::WriteMode;
use bln_etl_core::archive::AddOptions;

pub fn execute(args: &AddArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    if args.rename.is_some() && args.files.len() != 1 {
        bail!(
            "--rename needs exactly one FILE, got {}\n\
             HINT: Add files one at a time when renaming.",
            args.files.len()
        );
    }

    let archive = add_archive_context(
        Archive::with_config(&args.archive, archive_config(&args.compression)),
        &args.archive,
    )?;

    let mut entries = Vec::with_capacity(args.files.len());
    for (index, file) in args.files.iter().enumerate() {
        // Only the first write may truncate.
        let mode = if index == 0 {
            write_mode(args.overwrite)
        } else {
            WriteMode::Append
        };

        let mut options = AddOptions::new().with_mode(mode);
        if let Some(root) = &args.drop_root {
            options = options.with_drop_root(root);
        }
        if let Some(name) = &args.rename {
            options = options.with_rename(name);
        }

        let name = add_archive_context(archive.add(file, &options), &args.archive)?;
        entries.push(name);
    }

    formatter.format_added(&args.archive, &entries)
}
