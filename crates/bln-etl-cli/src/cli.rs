//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bln-etl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add files to a zip archive
    Add(AddArgs),
    /// Add a directory tree to a zip archive
    AddDir(AddDirArgs),
    /// List entry names stored in a zip archive
    List(ListArgs),
    /// List Big Local News projects
    Projects(ProjectsArgs),
    /// List files stored in a project
    Files(FilesArgs),
    /// Upload files to a project
    Upload(UploadArgs),
    /// Delete a file from a project
    DeleteFile(DeleteFileArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

impl Commands {
    /// Operation name used in JSON output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::AddDir(_) => "add-dir",
            Self::List(_) => "list",
            Self::Projects(_) => "projects",
            Self::Files(_) => "files",
            Self::Upload(_) => "upload",
            Self::DeleteFile(_) => "delete-file",
            Self::Completion(_) => "completion",
        }
    }
}

#[derive(clap::Args)]
pub struct CompressionArgs {
    /// Store entries without compression
    #[arg(long)]
    pub store: bool,

    /// Deflate level (1-9)
    #[arg(
        short = 'l',
        long,
        value_parser = clap::value_parser!(u8).range(1..=9),
        conflicts_with = "store"
    )]
    pub compression_level: Option<u8>,
}

#[derive(clap::Args)]
pub struct AddArgs {
    /// Zip archive to write
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Files to add
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Truncate the archive before adding the first file
    #[arg(long)]
    pub overwrite: bool,

    /// Store the file under this name (single file only)
    #[arg(long, value_name = "NAME")]
    pub rename: Option<String>,

    /// Keep the directory structure below this root
    #[arg(long, value_name = "DIR")]
    pub drop_root: Option<PathBuf>,

    #[command(flatten)]
    pub compression: CompressionArgs,
}

#[derive(clap::Args)]
pub struct AddDirArgs {
    /// Zip archive to write
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Directory to add
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Glob selecting files, relative to DIR
    #[arg(long, default_value = bln_etl_core::archive::DEFAULT_PATTERN)]
    pub pattern: String,

    /// Include files whose name starts with '.'
    #[arg(long)]
    pub include_hidden: bool,

    /// Truncate the archive before adding
    #[arg(long)]
    pub overwrite: bool,

    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_symlinks: bool,

    #[command(flatten)]
    pub compression: CompressionArgs,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,
}

#[derive(clap::Args)]
pub struct ApiArgs {
    /// API token (default: BLN_API_KEY)
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,
}

#[derive(clap::Args)]
pub struct ProjectsArgs {
    /// List open projects instead of your own
    #[arg(long)]
    pub open: bool,

    #[command(flatten)]
    pub api: ApiArgs,
}

#[derive(clap::Args)]
pub struct FilesArgs {
    /// Project id
    #[arg(value_name = "PROJECT_ID")]
    pub project_id: String,

    #[command(flatten)]
    pub api: ApiArgs,
}

#[derive(clap::Args)]
pub struct UploadArgs {
    /// Project id
    #[arg(value_name = "PROJECT_ID")]
    pub project_id: String,

    /// Files to upload
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub api: ApiArgs,
}

#[derive(clap::Args)]
pub struct DeleteFileArgs {
    /// Project id
    #[arg(value_name = "PROJECT_ID")]
    pub project_id: String,

    /// File name
    #[arg(value_name = "NAME")]
    pub name: String,

    #[command(flatten)]
    pub api: ApiArgs,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "bln-etl",
            "add",
            "out.zip",
            "a.csv",
            "b.csv",
            "--overwrite",
            "--drop-root",
            "files",
            "-l",
            "9",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.files.len(), 2);
        assert!(args.overwrite);
        assert_eq!(args.drop_root, Some(PathBuf::from("files")));
        assert_eq!(args.compression.compression_level, Some(9));
    }

    #[test]
    fn test_store_conflicts_with_level() {
        let result = Cli::try_parse_from(["bln-etl", "add", "out.zip", "a.csv", "--store", "-l", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_add_dir_defaults() {
        let cli = Cli::try_parse_from(["bln-etl", "add-dir", "out.zip", "data"])
            .unwrap_or_else(|e| panic!("{e}"));
        let Commands::AddDir(args) = cli.command else {
            panic!("expected add-dir");
        };
        assert_eq!(args.pattern, "**/*");
        assert!(!args.include_hidden);
        assert!(!args.overwrite);
    }

    #[test]
    fn test_operation_names() {
        let cli = Cli::try_parse_from(["bln-etl", "delete-file", "p1", "a.csv"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(cli.command.name(), "delete-file");
    }
}
