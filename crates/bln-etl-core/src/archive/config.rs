//! Configuration for archive writes.

use crate::Error;
use crate::Result;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// How the archive container is opened for a write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Keep existing entries and add new ones after them.
    #[default]
    Append,
    /// Truncate the container before writing.
    Overwrite,
}

impl FromStr for WriteMode {
    type Err = Error;

    /// Parses `"a"`/`"append"` and `"w"`/`"overwrite"`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "a" | "append" => Ok(Self::Append),
            "w" | "overwrite" => Ok(Self::Overwrite),
            other => Err(Error::Configuration(format!(
                "unknown write mode {other:?}, expected \"a\" or \"w\""
            ))),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Append => f.write_str("append"),
            Self::Overwrite => f.write_str("overwrite"),
        }
    }
}

/// Compression method applied to every entry an [`Archive`](super::Archive)
/// writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompressionMode {
    /// Deflate compression.
    #[default]
    Deflate,
    /// No compression.
    Store,
}

/// Settings fixed for the lifetime of an [`Archive`](super::Archive).
///
/// # Examples
///
/// ```
/// use bln_etl_core::archive::ArchiveConfig;
/// use bln_etl_core::archive::CompressionMode;
///
/// let config = ArchiveConfig::default()
///     .with_compression(CompressionMode::Store)
///     .with_preserve_permissions(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Compression method.
    ///
    /// Default: [`CompressionMode::Deflate`].
    pub compression: CompressionMode,

    /// Deflate level (1-9). Ignored for [`CompressionMode::Store`].
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,

    /// Record Unix permission bits of source files.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            compression: CompressionMode::Deflate,
            compression_level: Some(6),
            preserve_permissions: true,
        }
    }
}

impl ArchiveConfig {
    /// Creates an `ArchiveConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression method.
    #[must_use]
    pub fn with_compression(mut self, compression: CompressionMode) -> Self {
        self.compression = compression;
        self
    }

    /// Sets the deflate level.
    ///
    /// # Panics
    ///
    /// Panics if the level is not in the range 1-9.
    /// Use `validate()` for non-panicking validation.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!((1..=9).contains(&level), "compression level must be 1-9");
        self.compression_level = Some(level);
        self
    }

    /// Sets whether to record permission bits.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCompressionLevel`] if the level is set but not
    /// in range 1-9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(Error::InvalidCompressionLevel { level });
        }
        Ok(())
    }
}

/// Options for [`Archive::add`](super::Archive::add).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Container open mode.
    pub mode: WriteMode,

    /// Replacement for the final segment of the entry name.
    pub rename: Option<String>,

    /// Keep the directory structure below this root instead of flattening
    /// to the base name.
    pub drop_root: Option<PathBuf>,
}

impl AddOptions {
    /// Creates options that append the file under its base name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the write mode.
    #[must_use]
    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the replacement file name.
    #[must_use]
    pub fn with_rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    /// Sets the root to strip from the source path.
    #[must_use]
    pub fn with_drop_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.drop_root = Some(root.into());
        self
    }
}

/// Options for [`Archive::add_dir`](super::Archive::add_dir).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddDirOptions {
    /// Container open mode.
    ///
    /// Default: [`WriteMode::Append`].
    pub mode: WriteMode,

    /// Glob evaluated against paths relative to the walked folder.
    ///
    /// Default: `"**/*"` (everything at any depth).
    pub pattern: String,

    /// Skip entries whose own name starts with `.`.
    ///
    /// Default: `true`.
    pub skip_hidden: bool,

    /// Descend into symlinked directories.
    ///
    /// Default: `false`.
    pub follow_symlinks: bool,
}

impl Default for AddDirOptions {
    fn default() -> Self {
        Self {
            mode: WriteMode::Append,
            pattern: DEFAULT_PATTERN.to_string(),
            skip_hidden: true,
            follow_symlinks: false,
        }
    }
}

/// Glob matching every entry at any depth.
pub const DEFAULT_PATTERN: &str = "**/*";

impl AddDirOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the write mode.
    #[must_use]
    pub fn with_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the glob pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Sets whether to skip hidden entries.
    #[must_use]
    pub fn with_skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }

    /// Sets whether to follow symlinked directories.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}
