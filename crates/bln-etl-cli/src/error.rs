//! Error conversion utilities for CLI.
//!
//! Converts bln-etl-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use bln_etl_core::Error;
use bln_etl_core::api::TOKEN_ENV;
use std::path::Path;

/// Converts an archive operation error to a user-friendly anyhow error
pub fn convert_archive_error(err: Error, archive: &Path) -> anyhow::Error {
    match err {
        Error::SplitRootNotFound { path, split_on } => {
            anyhow!(
                "Cannot name '{}' for '{}': '{}' is not part of its path\n\
                 HINT: --drop-root must name a directory that contains the file.",
                path.display(),
                archive.display(),
                split_on.display()
            )
        }
        Error::DuplicateEntry { name } => {
            anyhow!(
                "Archive '{}' already contains '{name}'\n\
                 HINT: Use --rename to store it under another name, or --overwrite to start over.",
                archive.display()
            )
        }
        Error::InvalidRename { name } => {
            anyhow!(
                "Invalid --rename value {name:?}\n\
                 HINT: The new name must be a plain file name without '/'."
            )
        }
        Error::InvalidPattern { pattern, reason } => {
            anyhow!(
                "Invalid --pattern {pattern:?}: {reason}\n\
                 HINT: Use glob syntax such as '**/*.csv' or '*.json'."
            )
        }
        Error::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The file may be corrupted or not a zip archive.",
                archive.display(),
                reason
            )
        }
        Error::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
        _ => anyhow::Error::from(err)
            .context(format!("Error processing archive '{}'", archive.display())),
    }
}

/// Converts an API error to a user-friendly anyhow error
pub fn convert_api_error(err: Error) -> anyhow::Error {
    match err {
        Error::Configuration(message) => {
            anyhow!(
                "{message}\n\
                 HINT: Pass --token or set {TOKEN_ENV} (a .env file in the working directory is read)."
            )
        }
        Error::Api { messages } => {
            anyhow!(
                "The API rejected the request: {}\n\
                 HINT: Check that your token is valid and has access to the project.",
                messages.join("; ")
            )
        }
        Error::Http(http_err) => {
            anyhow!("Could not reach the API: {http_err}")
        }
        _ => anyhow::Error::from(err),
    }
}

/// Adds archive context to a core result
pub fn add_archive_context<T>(
    result: bln_etl_core::Result<T>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, archive))
}

/// Adds API context to a core result
pub fn add_api_context<T>(result: bln_etl_core::Result<T>) -> anyhow::Result<T> {
    result.map_err(convert_api_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_split_root_error() {
        let err = Error::SplitRootNotFound {
            path: PathBuf::from("/data/test.csv"),
            split_on: PathBuf::from("files"),
        };
        let converted = convert_archive_error(err, Path::new("out.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("/data/test.csv"));
        assert!(msg.contains("files"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_duplicate_error() {
        let err = Error::DuplicateEntry {
            name: "test.csv".into(),
        };
        let msg = format!("{:?}", convert_archive_error(err, Path::new("out.zip")));
        assert!(msg.contains("already contains 'test.csv'"));
        assert!(msg.contains("--overwrite"));
    }

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let converted = convert_archive_error(Error::Io(io_err), Path::new("out.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("I/O error"));
    }

    #[test]
    fn test_convert_missing_token() {
        let converted = convert_api_error(Error::Configuration("no API token".into()));
        let msg = format!("{converted:?}");
        assert!(msg.contains("--token"));
        assert!(msg.contains(TOKEN_ENV));
    }

    #[test]
    fn test_convert_api_messages() {
        let err = Error::Api {
            messages: vec!["Signature has expired".into()],
        };
        let msg = format!("{:?}", convert_api_error(err));
        assert!(msg.contains("Signature has expired"));
    }
}
