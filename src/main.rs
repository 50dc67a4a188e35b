use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use seller_console::cli::handlers::{self, CommandContext, ListParams};
use seller_console::cli::{Cli, Commands};
use seller_console::config::ConsoleConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    seller_console::logging::init(cli.verbose, cli.log_file.map(PathBuf::from));

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Init {
            fixture,
            store_path,
        } => handlers::handle_init(fixture, store_path),
        Commands::Check { file, json } => handlers::handle_check(file, json),
        Commands::List {
            query,
            status,
            json,
        } => handlers::handle_list(
            &load_context(config)?,
            ListParams {
                query,
                status,
                json,
            },
        ),
        Commands::Filter {
            query,
            status,
            clear,
        } => handlers::handle_filter(&load_context(config)?, query, status, clear),
        Commands::Opportunities { json } => {
            handlers::handle_opportunities(&load_context(config)?, json)
        }
        Commands::Console { mode } => {
            handlers::handle_console(&load_context(config)?, mode.map(Into::into))
        }
    }
}

fn load_context(config_path: Option<&str>) -> Result<CommandContext> {
    let (config, root) = match config_path {
        Some(path) => ConsoleConfig::load_file(&PathBuf::from(path)),
        None => ConsoleConfig::load(&std::env::current_dir()?),
    }
    .context("Failed to load seller configuration")?;
    CommandContext::new(config, root)
}
