//! Directory tree walking with filtering.

use crate::Error;
use crate::Result;
use crate::archive::arcname::relative_name;
use crate::archive::config::AddDirOptions;
use crate::archive::filters;
use crate::archive::filters::GlobFilter;
use std::cmp::Ordering;
use std::path::Path;
use std::path::PathBuf;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// Walks a directory tree and yields the files an
/// [`Archive::add_dir`](super::Archive::add_dir) call should write.
///
/// Within each directory, files come before subdirectories and both are
/// sorted by name, so the yielded order is stable across runs and
/// platforms.
///
/// # Examples
///
/// ```no_run
/// use bln_etl_core::archive::AddDirOptions;
/// use bln_etl_core::archive::walker::FilteredWalker;
/// use std::path::Path;
///
/// let options = AddDirOptions::default();
/// let walker = FilteredWalker::new(Path::new("./data"), &options)?;
/// for entry in walker.selected()? {
///     println!("{} -> {}", entry.path.display(), entry.archive_name);
/// }
/// # Ok::<(), bln_etl_core::Error>(())
/// ```
pub struct FilteredWalker<'a> {
    root: &'a Path,
    options: &'a AddDirOptions,
    filter: GlobFilter,
    excluded: Option<PathBuf>,
}

/// A file selected for archiving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredEntry {
    /// Full filesystem path.
    pub path: PathBuf,

    /// Entry name inside the archive, relative to the walked root.
    pub archive_name: String,
}

/// Outcome of inspecting one walked path.
#[derive(Debug)]
pub enum WalkItem {
    /// File to write.
    Selected(FilteredEntry),
    /// File skipped because its own name starts with `.`.
    Hidden(PathBuf),
}

impl<'a> FilteredWalker<'a> {
    /// Creates a walker rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] if the options' pattern does not
    /// compile.
    pub fn new(root: &'a Path, options: &'a AddDirOptions) -> Result<Self> {
        let filter = GlobFilter::new(&options.pattern)?;
        Ok(Self {
            root,
            options,
            filter,
            excluded: None,
        })
    }

    /// Never yields the file at `path`.
    ///
    /// Used to keep an archive that lives inside the walked folder out of
    /// itself. `path` should be canonical; walked paths are canonicalized
    /// only when their file name matches.
    #[must_use]
    pub fn excluding(mut self, path: PathBuf) -> Self {
        self.excluded = Some(path);
        self
    }

    /// Returns an iterator over selected files and skipped hidden files.
    ///
    /// A root that does not exist yields nothing. Directories and entries
    /// not matching the pattern are dropped silently.
    ///
    /// # Errors
    ///
    /// Items may error if a directory cannot be read or an entry name is
    /// not valid UTF-8.
    pub fn walk(&self) -> impl Iterator<Item = Result<WalkItem>> + '_ {
        let walker = self.root.exists().then(|| {
            WalkDir::new(self.root)
                .min_depth(1)
                .follow_links(self.options.follow_symlinks)
                .sort_by(files_first)
                .into_iter()
        });

        walker
            .into_iter()
            .flatten()
            .filter_map(move |entry| match entry {
                Ok(entry) => self.inspect(&entry).transpose(),
                Err(e) => Some(Err(Error::Io(std::io::Error::other(format!(
                    "walkdir error: {e}"
                ))))),
            })
    }

    /// Convenience wrapper returning only the selected files.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by [`walk`](Self::walk).
    pub fn selected(&self) -> Result<Vec<FilteredEntry>> {
        let mut entries = Vec::new();
        for item in self.walk() {
            if let WalkItem::Selected(entry) = item? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.excluded.as_deref().is_some_and(|excluded| {
            path.file_name() == excluded.file_name()
                && path.canonicalize().is_ok_and(|canonical| canonical == excluded)
        })
    }

    fn inspect(&self, entry: &DirEntry) -> Result<Option<WalkItem>> {
        let path = entry.path();

        // Symlinks to directories count as directories.
        if path.is_dir() {
            return Ok(None);
        }

        if self.is_excluded(path) {
            tracing::debug!(path = %path.display(), "skipping archive container");
            return Ok(None);
        }

        let archive_name = relative_name(path, self.root)?;
        if !self.filter.matches(&archive_name) {
            return Ok(None);
        }

        if self.options.skip_hidden && filters::is_hidden(path) {
            tracing::debug!(path = %path.display(), "skipping hidden file");
            return Ok(Some(WalkItem::Hidden(path.to_path_buf())));
        }

        Ok(Some(WalkItem::Selected(FilteredEntry {
            path: path.to_path_buf(),
            archive_name,
        })))
    }
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}
