//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use bln_etl_core::api::Project;
use bln_etl_core::api::ProjectFile;
use bln_etl_core::archive::AddDirReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct EntriesOutput<'a> {
    archive: String,
    entries: &'a [String],
}

impl OutputFormatter for JsonFormatter {
    fn format_added(&self, archive: &Path, entries: &[String]) -> Result<()> {
        let data = EntriesOutput {
            archive: archive.display().to_string(),
            entries,
        };
        Self::output(&JsonOutput::success("add", data))
    }

    fn format_add_dir_result(&self, archive: &Path, report: &AddDirReport) -> Result<()> {
        #[derive(Serialize)]
        struct AddDirOutput<'a> {
            archive: String,
            entries: &'a [String],
            files_added: usize,
            hidden_skipped: usize,
            bytes_written: u64,
            duration_ms: u128,
        }

        let data = AddDirOutput {
            archive: archive.display().to_string(),
            entries: &report.entries,
            files_added: report.files_added(),
            hidden_skipped: report.hidden_skipped,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
        };
        Self::output(&JsonOutput::success("add-dir", data))
    }

    fn format_listing(&self, archive: &Path, entries: &[String]) -> Result<()> {
        let data = EntriesOutput {
            archive: archive.display().to_string(),
            entries,
        };
        Self::output(&JsonOutput::success("list", data))
    }

    fn format_projects(&self, projects: &[Project]) -> Result<()> {
        #[derive(Serialize)]
        struct ProjectOutput<'a> {
            slug: String,
            #[serde(flatten)]
            project: &'a Project,
        }

        let data: Vec<ProjectOutput<'_>> = projects
            .iter()
            .map(|project| ProjectOutput {
                slug: project.slug(),
                project,
            })
            .collect();
        Self::output(&JsonOutput::success("projects", data))
    }

    fn format_files(&self, project_id: &str, files: &[ProjectFile]) -> Result<()> {
        #[derive(Serialize)]
        struct FilesOutput<'a> {
            project_id: &'a str,
            files: Vec<&'a str>,
        }

        let data = FilesOutput {
            project_id,
            files: files.iter().map(|f| f.name.as_str()).collect(),
        };
        Self::output(&JsonOutput::success("files", data))
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }

    fn format_success(&self, operation: &str, message: &str) {
        #[derive(Serialize)]
        struct SuccessData<'a> {
            message: &'a str,
        }

        let _ = Self::output(&JsonOutput::success(operation, SuccessData { message }));
    }
}
