//! bln-etl CLI - Command-line utility for building ETL archives and managing
//! Big Local News projects.

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing::Level;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    let result = match &cli.command {
        cli::Commands::Add(args) => commands::add::execute(args, &*formatter),
        cli::Commands::AddDir(args) => commands::add_dir::execute(args, &*formatter),
        cli::Commands::List(args) => commands::list::execute(args, &*formatter),
        cli::Commands::Projects(args) => commands::projects::execute(args, &*formatter),
        cli::Commands::Files(args) => commands::files::execute(args, &*formatter),
        cli::Commands::Upload(args) => commands::upload::execute(args, &*formatter),
        cli::Commands::DeleteFile(args) => commands::delete_file::execute(args, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(cli.command.name(), &err);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays parseable with `--json`.
fn init_tracing(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
