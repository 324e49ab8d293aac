//! Code Notes CLI - personal notes, file notes and a checklist from the terminal
//!
//! Every command opens the notes panel, acts on it as the user would, and
//! closes it again, so the store only ever changes through panel messages.

mod cli;
mod commands;
mod config;
mod error;
mod session;
mod terminal;


use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::check::run_check;
use crate::commands::clear::run_clear_completed;
use crate::commands::common::resolve_store_path;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::goto::run_goto;
use crate::commands::list::run_list;
use crate::commands::note::run_note;
use crate::commands::render::run_render;
use crate::commands::toggle::run_toggle;
use crate::config::CliConfig;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "codenotes=warn".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let command = match cli.command {
        None => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
            return Ok(());
        }
        Some(Commands::Completions { shell, output }) => {
            return run_completions(shell, output.as_deref());
        }
        Some(Commands::Config { command }) => return run_config(command),
        Some(command) => command,
    };

    let config = CliConfig::load().map_err(CliError::Config)?;
    let store_path = resolve_store_path(cli.store, &config)?;
    tracing::debug!("Using store at {}", store_path.display());

    match command {
        Commands::Add { text } => run_add(&text, &config, &store_path).await,
        Commands::Note { file, line, text } => run_note(&file, line, &text, &store_path).await,
        Commands::Check { text } => run_check(&text, &config, &store_path).await,
        Commands::Toggle { id } => run_toggle(&id, &store_path).await,
        Commands::Edit { id, text } => run_edit(&id, &text, &config, &store_path).await,
        Commands::Delete { id } => run_delete(&id, &store_path).await,
        Commands::ClearCompleted => run_clear_completed(&store_path).await,
        Commands::List { json } => run_list(json, &store_path).await,
        Commands::Goto { id, open } => run_goto(&id, open, &config, &store_path).await,
        Commands::Render { output } => run_render(output.as_deref(), &store_path).await,
        Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
    }
}
