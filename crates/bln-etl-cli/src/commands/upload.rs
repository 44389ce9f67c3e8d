//! Upload command implementation

use crate::cli::UploadArgs;
use crate::error::add_api_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use bln_etl_core::Client;

pub fn execute(args: &UploadArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    if let Some(missing) = args.files.iter().find(|f| !f.is_file()) {
        bail!("File not found: {}", missing.display());
    }

    let client = add_api_context(Client::from_env(args.api.token.clone()))?;
    add_api_context(client.upload_files(&args.project_id, &args.files))?;

    formatter.format_success(
        "upload",
        &format!(
            "Uploaded {} file(s) to project {}",
            args.files.len(),
            args.project_id
        ),
    );
    Ok(())
}
