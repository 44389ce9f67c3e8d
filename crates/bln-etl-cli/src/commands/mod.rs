//! Subcommand implementations.

pub mod add;
pub mod add_dir;
pub mod completion;
pub mod delete_file;
pub mod files;
pub mod list;
pub mod projects;
pub mod upload;

use crate::cli::CompressionArgs;
use bln_etl_core::ArchiveConfig;
use bln_etl_core::WriteMode;
use bln_etl_core::archive::CompressionMode;

fn archive_config(args: &CompressionArgs) -> ArchiveConfig {
    let config = if args.store {
        ArchiveConfig::default().with_compression(CompressionMode::Store)
    } else {
        ArchiveConfig::default()
    };

    match args.compression_level {
        Some(level) => config.with_compression_level(level),
        None => config,
    }
}

const fn write_mode(overwrite: bool) -> WriteMode {
    if overwrite {
        WriteMode::Overwrite
    } else {
        WriteMode::Append
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_config_from_flags() {
        let config = archive_config(&CompressionArgs {
            store: true,
            compression_level: None,
        });
        assert_eq!(config.compression, CompressionMode::Store);

        let config = archive_config(&CompressionArgs {
            store: false,
            compression_level: Some(9),
        });
        assert_eq!(config.compression, CompressionMode::Deflate);
        assert_eq!(config.compression_level, Some(9));
    }

    #[test]
    fn test_write_mode_from_flag() {
        assert_eq!(write_mode(true), WriteMode::Overwrite);
        assert_eq!(write_mode(false), WriteMode::Append);
    }
}
