//! Zip archive builder.
//!
//! An [`Archive`] is bound to a single container path and adds local files
//! to it one at a time ([`Archive::add`]) or a whole directory tree at once
//! ([`Archive::add_dir`]). Each call opens the container, writes, and closes
//! it again; nothing is held open between calls.

mod arcname;
mod config;
mod report;
mod writer;

pub mod filters;
pub mod walker;

pub use arcname::arcname;
pub use arcname::rename;
pub use arcname::resolve_arcname;
pub use config::AddDirOptions;
pub use config::AddOptions;
pub use config::ArchiveConfig;
pub use config::CompressionMode;
pub use config::DEFAULT_PATTERN;
pub use config::WriteMode;
pub use report::AddDirReport;

use crate::Result;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use walker::FilteredWalker;
use walker::WalkItem;
use writer::ContainerWriter;

/// A zip container on disk.
///
/// # Examples
///
/// ```no_run
/// use bln_etl_core::archive::AddDirOptions;
/// use bln_etl_core::archive::AddOptions;
/// use bln_etl_core::archive::Archive;
///
/// let archive = Archive::new("export.zip");
/// archive.add("data/files/test.csv", &AddOptions::new().with_rename("latest.csv"))?;
///
/// let report = archive.add_dir("data/files", &AddDirOptions::new().with_pattern("**/*.csv"))?;
/// println!("added {} files", report.files_added());
/// # Ok::<(), bln_etl_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Archive {
    path: PathBuf,
    config: ArchiveConfig,
}

impl Archive {
    /// Creates a handle for the container at `path` with default settings.
    ///
    /// The container is not touched until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: ArchiveConfig::default(),
        }
    }

    /// Creates a handle with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCompressionLevel`](crate::Error::InvalidCompressionLevel)
    /// if the configuration does not validate.
    pub fn with_config(path: impl Into<PathBuf>, config: ArchiveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            path: path.into(),
            config,
        })
    }

    /// Container path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Settings applied to every write.
    #[must_use]
    pub const fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Adds one file and returns the entry name it was stored under.
    ///
    /// The entry name is the file's base name, or the path below
    /// `options.drop_root` when set; `options.rename` then replaces the final
    /// segment.
    ///
    /// # Errors
    ///
    /// Naming errors ([`SplitRootNotFound`](crate::Error::SplitRootNotFound),
    /// [`InvalidRename`](crate::Error::InvalidRename)) are raised before the
    /// container is opened, so a failed call in overwrite mode leaves the
    /// existing container untouched. Also returns
    /// [`DuplicateEntry`](crate::Error::DuplicateEntry) when appending a name
    /// that is already stored, and I/O or zip errors.
    pub fn add(&self, source: impl AsRef<Path>, options: &AddOptions) -> Result<String> {
        let source = source.as_ref();
        let name = resolve_arcname(
            source,
            options.drop_root.as_deref(),
            options.rename.as_deref(),
        )?;

        if !source.is_file() {
            let err = if source.exists() {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("not a regular file: {}", source.display()),
                )
            } else {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("source file not found: {}", source.display()),
                )
            };
            return Err(err.into());
        }

        let mut writer = ContainerWriter::open(&self.path, options.mode, &self.config)?;
        let bytes = writer.write_file(source, &name)?;
        writer.finish()?;

        tracing::info!(
            archive = %self.path.display(),
            source = %source.display(),
            entry = %name,
            bytes,
            mode = %options.mode,
            "added file to archive"
        );

        Ok(name)
    }

    /// Adds every file under `folder` that matches `options.pattern`.
    ///
    /// Entry names are paths relative to `folder`. A folder that does not
    /// exist adds nothing, but the container is still opened (and truncated
    /// in overwrite mode). The container itself is never added, even when it
    /// lives inside `folder`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPattern`](crate::Error::InvalidPattern) before the
    /// container is opened, and [`DuplicateEntry`](crate::Error::DuplicateEntry)
    /// or I/O errors during the walk. Entries written before an error stay in
    /// the container.
    pub fn add_dir(&self, folder: impl AsRef<Path>, options: &AddDirOptions) -> Result<AddDirReport> {
        let start = Instant::now();
        let folder = folder.as_ref();
        let walker = FilteredWalker::new(folder, options)?;

        let mut writer = ContainerWriter::open(&self.path, options.mode, &self.config)?;
        let walker = walker.excluding(self.path.canonicalize()?);
        let mut report = AddDirReport::new();

        for item in walker.walk() {
            match item? {
                WalkItem::Selected(entry) => {
                    let bytes = writer.write_file(&entry.path, &entry.archive_name)?;
                    report.record_entry(entry.archive_name, bytes);
                }
                WalkItem::Hidden(_) => report.record_hidden(),
            }
        }

        writer.finish()?;
        report.duration = start.elapsed();

        tracing::info!(
            archive = %self.path.display(),
            folder = %folder.display(),
            pattern = %options.pattern,
            files = report.files_added(),
            hidden_skipped = report.hidden_skipped,
            bytes = report.bytes_written,
            "added directory to archive"
        );

        Ok(report)
    }

    /// Lists entry names in stored order.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the container does not exist and
    /// [`InvalidArchive`](crate::Error::InvalidArchive) if it is not a zip.
    pub fn list(&self) -> Result<Vec<String>> {
        writer::list_names(&self.path)
    }

    /// Reads the decompressed bytes of one entry.
    ///
    /// # Errors
    ///
    /// Returns [`EntryNotFound`](crate::Error::EntryNotFound) for an unknown
    /// name, plus the errors of [`list`](Self::list).
    pub fn read_entry(&self, name: &str) -> Result<Vec<u8>> {
        writer::read_entry(&self.path, name)
    }
}
