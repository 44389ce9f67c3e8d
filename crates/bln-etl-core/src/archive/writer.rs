//! Scoped zip container writes.

use crate::Error;
use crate::Result;
use crate::archive::config::ArchiveConfig;
use crate::archive::config::CompressionMode;
use crate::archive::config::WriteMode;
use std::collections::HashSet;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// An open zip container.
///
/// Dropping the writer without calling [`finish`](Self::finish) still writes
/// the central directory, so entries written before an error stay readable.
pub(crate) struct ContainerWriter {
    zip: ZipWriter<File>,
    options: SimpleFileOptions,
    preserve_permissions: bool,
    names: HashSet<String>,
    buffer: Vec<u8>,
}

impl ContainerWriter {
    /// Opens the container at `path`.
    ///
    /// A missing or empty container is created fresh in either mode;
    /// `Overwrite` truncates an existing one.
    pub(crate) fn open(path: &Path, mode: WriteMode, config: &ArchiveConfig) -> Result<Self> {
        let existing = path.metadata().is_ok_and(|m| m.len() > 0);

        let (zip, names) = if mode == WriteMode::Append && existing {
            let names = stored_names(path)?;
            let file = OpenOptions::new().read(true).write(true).open(path)?;
            (ZipWriter::new_append(file)?, names)
        } else {
            (ZipWriter::new(File::create(path)?), HashSet::new())
        };

        tracing::debug!(
            path = %path.display(),
            %mode,
            existing_entries = names.len(),
            "opened archive container"
        );

        Ok(Self {
            zip,
            options: file_options(config),
            preserve_permissions: config.preserve_permissions,
            names,
            buffer: vec![0u8; 64 * 1024],
        })
    }

    /// Writes the file at `source` as entry `name`, returning the number of
    /// uncompressed bytes written.
    pub(crate) fn write_file(&mut self, source: &Path, name: &str) -> Result<u64> {
        if self.names.contains(name) {
            return Err(Error::DuplicateEntry {
                name: name.to_string(),
            });
        }

        let mut file = File::open(source)?;
        let metadata = file.metadata()?;

        let options = self.options.large_file(needs_zip64(metadata.len()));
        let options = if self.preserve_permissions {
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                options.unix_permissions(metadata.permissions().mode())
            }
            #[cfg(not(unix))]
            {
                options
            }
        } else {
            options
        };

        self.zip.start_file(name, options)?;

        let mut bytes_written = 0u64;
        loop {
            let bytes_read = file.read(&mut self.buffer)?;
            if bytes_read == 0 {
                break;
            }
            self.zip.write_all(&self.buffer[..bytes_read])?;
            bytes_written += bytes_read as u64;
        }
        self.zip.flush()?;

        self.names.insert(name.to_string());
        tracing::debug!(
            source = %source.display(),
            entry = name,
            bytes = bytes_written,
            size = metadata.len(),
            "wrote archive entry"
        );

        Ok(bytes_written)
    }

    /// Writes the central directory and closes the container.
    pub(crate) fn finish(self) -> Result<()> {
        self.zip.finish()?;
        Ok(())
    }
}

/// Returns entry names in central-directory order.
pub(crate) fn list_names(path: &Path) -> Result<Vec<String>> {
    let archive = ZipArchive::new(File::open(path)?)?;
    Ok(archive.file_names().map(ToString::to_string).collect())
}

/// Reads the decompressed bytes of entry `name`.
pub(crate) fn read_entry(path: &Path, name: &str) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let mut entry = archive.by_name(name).map_err(|e| match e {
        zip::result::ZipError::FileNotFound => Error::EntryNotFound {
            name: name.to_string(),
        },
        other => other.into(),
    })?;

    let mut data = Vec::new();
    entry.read_to_end(&mut data)?;
    Ok(data)
}

/// Largest size a plain zip header can record.
const ZIP32_LIMIT: u64 = 0xFFFF_FFFF;

/// Entries at or above 4 GiB need ZIP64 extra fields.
const fn needs_zip64(size: u64) -> bool {
    size >= ZIP32_LIMIT
}

fn stored_names(path: &Path) -> Result<HashSet<String>> {
    Ok(list_names(path)?.into_iter().collect())
}

fn file_options(config: &ArchiveConfig) -> SimpleFileOptions {
    match config.compression {
        CompressionMode::Store => {
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
        }
        CompressionMode::Deflate => {
            let level = config.compression_level.unwrap_or(6);
            SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(i64::from(level)))
        }
    }
}
