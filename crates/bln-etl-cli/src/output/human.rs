//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use bln_etl_core::api::Project;
use bln_etl_core::api::ProjectFile;
use bln_etl_core::archive::AddDirReport;
use console::Term;
use console::style;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (i, c) in s.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }

    fn headline(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_added(&self, archive: &Path, entries: &[String]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!(
            "Added {} to {}",
            match entries.len() {
                1 => "1 file".to_string(),
                n => format!("{} files", Self::format_number(n)),
            },
            archive.display()
        ));
        for entry in entries {
            let _ = self.term.write_line(&format!("  {entry}"));
        }

        Ok(())
    }

    fn format_add_dir_result(&self, archive: &Path, report: &AddDirReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!("Archive updated: {}", archive.display()));
        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added())
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_written)
        ));

        if report.hidden_skipped > 0 {
            let _ = self.term.write_line(&format!(
                "  Hidden skipped:   {}",
                Self::format_number(report.hidden_skipped)
            ));
        }

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));
            let _ = self.term.write_line("");
            for entry in &report.entries {
                let _ = self.term.write_line(&format!("  {entry}"));
            }
        }

        Ok(())
    }

    fn format_listing(&self, _archive: &Path, entries: &[String]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in entries {
            let _ = self.term.write_line(entry);
        }

        if self.verbose {
            let _ = self.term.write_line("");
            let _ = self.term.write_line(&format!(
                "Total: {} entries",
                Self::format_number(entries.len())
            ));
        }

        Ok(())
    }

    fn format_projects(&self, projects: &[Project]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for project in projects {
            let id = project.id.as_deref().unwrap_or("-");
            let role = project.user_role.as_deref().unwrap_or("");
            let name = if self.use_colors {
                style(&project.name).bold().to_string()
            } else {
                project.name.clone()
            };
            let _ = self.term.write_line(format!("{id}  {name}  {role}").trim_end());

            if self.verbose {
                let _ = self.term.write_line(&format!("    slug: {}", project.slug()));
                if !project.description.is_empty() {
                    let _ = self
                        .term
                        .write_line(&format!("    {}", project.description));
                }
            }
        }

        Ok(())
    }

    fn format_files(&self, _project_id: &str, files: &[ProjectFile]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for file in files {
            let _ = self.term.write_line(&file.to_string());
        }

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:#}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:#}"));
        }
    }

    fn format_success(&self, _operation: &str, message: &str) {
        if self.quiet {
            return;
        }

        self.headline(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(HumanFormatter::format_size(0), "0 B");
        assert_eq!(HumanFormatter::format_size(1023), "1023 B");
        assert_eq!(HumanFormatter::format_size(1536), "1.5 KB");
        assert_eq!(HumanFormatter::format_size(2 * 1024 * 1024), "2.0 MB");
        assert_eq!(HumanFormatter::format_size(1024 * 1024 * 1024), "1.0 GB");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(HumanFormatter::format_number(0), "0");
        assert_eq!(HumanFormatter::format_number(999), "999");
        assert_eq!(HumanFormatter::format_number(1000), "1,000");
        assert_eq!(HumanFormatter::format_number(1_234_567), "1,234,567");
    }
}
