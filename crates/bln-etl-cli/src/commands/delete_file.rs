//! Delete-file command implementation

use crate::cli::DeleteFileArgs;
use crate::error::add_api_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use bln_etl_core::Client;
use bln_etl_core::api::ProjectFile;

pub fn execute(args: &DeleteFileArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let client = add_api_context(Client::from_env(args.api.token.clone()))?;

    let file = ProjectFile {
        project_id: args.project_id.clone(),
        name: args.name.clone(),
    };
    add_api_context(client.delete_file(&file))?;

    formatter.format_success(
        "delete-file",
        &format!("Deleted {file} from project {}", args.project_id),
    );
    Ok(())
}
