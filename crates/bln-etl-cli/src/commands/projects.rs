//! Projects command implementation

use crate::cli::ProjectsArgs;
use crate::error::add_api_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use bln_etl_core::Client;

pub fn execute(args: &ProjectsArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let client = add_api_context(Client::from_env(args.api.token.clone()))?;

    let projects = if args.open {
        add_api_context(client.open_projects())?
    } else {
        add_api_context(client.user_projects())?
    };

    formatter.format_projects(&projects)
}
