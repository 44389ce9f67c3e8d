//! Output formatter trait for CLI results.

use anyhow::Result;
use bln_etl_core::api::Project;
use bln_etl_core::api::ProjectFile;
use bln_etl_core::archive::AddDirReport;
use serde::Serialize;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the entries written by `add`
    fn format_added(&self, archive: &Path, entries: &[String]) -> Result<()>;

    /// Format the result of `add-dir`
    fn format_add_dir_result(&self, archive: &Path, report: &AddDirReport) -> Result<()>;

    /// Format archive entry names
    fn format_listing(&self, archive: &Path, entries: &[String]) -> Result<()>;

    /// Format a project list
    fn format_projects(&self, projects: &[Project]) -> Result<()>;

    /// Format a project's files
    fn format_files(&self, project_id: &str, files: &[ProjectFile]) -> Result<()>;

    /// Format a failed operation
    fn format_error(&self, operation: &str, error: &anyhow::Error);

    /// Format a completed operation with no other output
    fn format_success(&self, operation: &str, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
