//! Error types for archive, API and repository operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by `bln-etl-core`.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive container is corrupted or not a zip file.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Requested entry is not stored in the archive.
    #[error("entry not found in archive: {name}")]
    EntryNotFound {
        /// The entry name that was looked up.
        name: String,
    },

    /// An entry with this name is already stored in the archive.
    #[error("duplicate entry name in archive: {name}")]
    DuplicateEntry {
        /// The conflicting entry name.
        name: String,
    },

    /// The root to strip does not occur in the source path.
    #[error("cannot strip {split_on} from {path}: root not found in path")]
    SplitRootNotFound {
        /// Source path being named.
        path: PathBuf,
        /// Root that was expected somewhere in `path`.
        split_on: PathBuf,
    },

    /// Replacement entry name is empty or contains a separator.
    #[error("invalid rename target: {name:?}")]
    InvalidRename {
        /// The rejected name.
        name: String,
    },

    /// Glob pattern could not be compiled.
    #[error("invalid glob pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Parser message.
        reason: String,
    },

    /// Compression level outside 1-9.
    #[error("invalid compression level {level}, must be 1-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// Missing or invalid client configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The API answered with an `errors` field or a mutation error.
    #[error("API error: {}", messages.join("; "))]
    Api {
        /// Messages reported by the server.
        messages: Vec<String>,
    },

    /// The API answered with JSON that lacks the expected shape.
    #[error("unexpected API response: {0}")]
    UnexpectedResponse(String),

    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// External command exited unsuccessfully.
    #[error("command `{command}` failed ({status}): {stderr}")]
    Command {
        /// Command line that was run.
        command: String,
        /// Exit status description.
        status: String,
        /// Captured standard error.
        stderr: String,
    },
}

impl Error {
    /// Returns `true` if the error comes from caller-supplied settings rather
    /// than from I/O or a remote service.
    ///
    /// # Examples
    ///
    /// ```
    /// use bln_etl_core::Error;
    ///
    /// let err = Error::InvalidRename { name: String::new() };
    /// assert!(err.is_configuration_error());
    ///
    /// let err = Error::InvalidArchive("bad header".to_string());
    /// assert!(!err.is_configuration_error());
    /// ```
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::SplitRootNotFound { .. }
                | Self::DuplicateEntry { .. }
                | Self::InvalidRename { .. }
                | Self::InvalidPattern { .. }
                | Self::InvalidCompressionLevel { .. }
                | Self::Configuration(_)
        )
    }

    pub(crate) fn api<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Api {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::Io(io),
            zip::result::ZipError::FileNotFound => Self::EntryNotFound {
                name: String::new(),
            },
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_zip_error_conversion() {
        let err: Error = zip::result::ZipError::InvalidArchive("bad magic".into()).into();
        assert!(matches!(err, Error::InvalidArchive(_)));

        let io_err = std::io::Error::other("disk gone");
        let err: Error = zip::result::ZipError::Io(io_err).into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_api_error_display() {
        let err = Error::api(["first", "second"]);
        assert_eq!(err.to_string(), "API error: first; second");
    }

    #[test]
    fn test_split_root_display() {
        let err = Error::SplitRootNotFound {
            path: PathBuf::from("/data/file.csv"),
            split_on: PathBuf::from("files"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/data/file.csv"));
        assert!(msg.contains("files"));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_runtime_errors_not_configuration() {
        assert!(!Error::UnexpectedResponse("x".into()).is_configuration_error());
        assert!(!Error::api(["boom"]).is_configuration_error());
        assert!(
            !Error::Command {
                command: "git pull".into(),
                status: "exit status: 1".into(),
                stderr: String::new(),
            }
            .is_configuration_error()
        );
    }
}
