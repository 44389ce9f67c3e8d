//! Files command implementation

use crate::cli::FilesArgs;
use crate::error::add_api_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use bln_etl_core::Client;
use bln_etl_core::api::FetchPolicy;

pub fn execute(args: &FilesArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let client = add_api_context(Client::from_env(args.api.token.clone()))?;

    let Some(mut project) = add_api_context(client.project(&args.project_id))? else {
        bail!("Project not found: {}", args.project_id);
    };
    let files = add_api_context(client.project_files(&mut project, FetchPolicy::Refresh))?;

    formatter.format_files(&args.project_id, files)
}
