//! Entry name computation.
//!
//! Entry names ("arcnames") are derived from source paths and never stored
//! outside the container. Names always use `/` as separator regardless of
//! platform.

use crate::Error;
use crate::Result;
use std::path::Component;
use std::path::Path;

/// Returns the part of `file_path` that follows the last occurrence of
/// `split_on`, with no leading separator.
///
/// Matching is done on whole path components, so `files` matches the
/// directory `files/` but not `files_old/`.
///
/// # Errors
///
/// Returns [`Error::SplitRootNotFound`] if `split_on` is empty, does not
/// occur in `file_path`, or leaves nothing after it.
///
/// # Examples
///
/// ```
/// use bln_etl_core::archive::arcname;
/// use std::path::Path;
///
/// let name = arcname(
///     Path::new("/data/files/nested/test3.csv"),
///     Path::new("files"),
/// )
/// .unwrap();
/// assert_eq!(name, "nested/test3.csv");
///
/// assert!(arcname(Path::new("/data/test.csv"), Path::new("files")).is_err());
/// ```
pub fn arcname(file_path: &Path, split_on: &Path) -> Result<String> {
    let path = significant_components(file_path);
    let root = significant_components(split_on);

    let not_found = || Error::SplitRootNotFound {
        path: file_path.to_path_buf(),
        split_on: split_on.to_path_buf(),
    };

    if root.is_empty() || root.len() >= path.len() {
        return Err(not_found());
    }

    let start = path
        .windows(root.len())
        .rposition(|window| window == root.as_slice())
        .ok_or_else(not_found)?;

    let rest = &path[start + root.len()..];
    if rest.is_empty() {
        return Err(not_found());
    }

    join_components(rest, file_path)
}

/// Replaces the final segment of `name` with `new_name`, keeping any
/// directory prefix.
///
/// # Errors
///
/// Returns [`Error::InvalidRename`] if `new_name` is empty or contains a
/// path separator.
///
/// # Examples
///
/// ```
/// use bln_etl_core::archive::rename;
///
/// assert_eq!(rename("nested/test3.csv", "x.csv").unwrap(), "nested/x.csv");
/// assert_eq!(rename("test.csv", "x.csv").unwrap(), "x.csv");
/// ```
pub fn rename(name: &str, new_name: &str) -> Result<String> {
    if new_name.is_empty() || new_name.contains(['/', '\\']) {
        return Err(Error::InvalidRename {
            name: new_name.to_string(),
        });
    }

    Ok(match name.rfind('/') {
        Some(idx) => format!("{}/{new_name}", &name[..idx]),
        None => new_name.to_string(),
    })
}

/// Computes the entry name for `source`.
///
/// With `drop_root`, the structure below the root is kept; otherwise only
/// the base name is used. `rename` then replaces the final segment.
///
/// # Errors
///
/// Propagates errors from [`arcname`] and [`rename`], and returns
/// [`Error::Io`] when `source` has no UTF-8 file name.
pub fn resolve_arcname(
    source: &Path,
    drop_root: Option<&Path>,
    new_name: Option<&str>,
) -> Result<String> {
    let name = match drop_root {
        Some(root) => arcname(source, root)?,
        None => base_name(source)?,
    };

    match new_name {
        Some(new_name) => rename(&name, new_name),
        None => Ok(name),
    }
}

/// Entry name of `path` relative to `root`, where `root` is known to be a
/// leading part of `path` (as for paths produced by walking `root`).
pub(crate) fn relative_name(path: &Path, root: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| Error::SplitRootNotFound {
            path: path.to_path_buf(),
            split_on: root.to_path_buf(),
        })?;
    let components = significant_components(relative);
    if components.is_empty() {
        return Err(Error::SplitRootNotFound {
            path: path.to_path_buf(),
            split_on: root.to_path_buf(),
        });
    }
    join_components(&components, path)
}

fn base_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(ToString::to_string)
        .ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("path has no UTF-8 file name: {}", path.display()),
            ))
        })
}

fn significant_components(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn join_components(components: &[Component<'_>], original: &Path) -> Result<String> {
    let mut parts = Vec::with_capacity(components.len());
    for component in components {
        let part = component.as_os_str().to_str().ok_or_else(|| {
            Error::Io(std::io::Error::other(format!(
                "path is not valid UTF-8: {}",
                original.display()
            )))
        })?;
        parts.push(part);
    }
    Ok(parts.join("/"))
}
