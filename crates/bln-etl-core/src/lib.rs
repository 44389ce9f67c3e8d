//! Building blocks for Big Local News ETL jobs.
//!
//! `bln-etl-core` bundles the three chores most export pipelines share:
//!
//! - [`archive`]: build zip archives from single files or directory trees,
//!   with control over entry names.
//! - [`api`]: a small client for the Big Local News GraphQL API (projects,
//!   files, uploads).
//! - [`repository`]: run `git` commands inside a scoped working directory.
//!
//! # Examples
//!
//! ```no_run
//! use bln_etl_core::Archive;
//! use bln_etl_core::archive::AddDirOptions;
//! use bln_etl_core::archive::AddOptions;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = Archive::new("export.zip");
//! archive.add(
//!     "/data/files/nested/test3.csv",
//!     &AddOptions::new().with_drop_root("files"),
//! )?;
//! let report = archive.add_dir("/data/files", &AddDirOptions::new().with_pattern("**/*.csv"))?;
//! println!("Added {} files", report.files_added());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod error;
pub mod repository;

// Re-export main API types
pub use api::Client;
pub use archive::Archive;
pub use archive::ArchiveConfig;
pub use archive::WriteMode;
pub use error::Error;
pub use error::Result;
pub use repository::Repository;
