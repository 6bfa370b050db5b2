//! libretuya CLI - LibreTuya platform configuration for firmware builds

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use libretuya::util::diagnostic::{emit, emit_error};
use libretuya::ConfigError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("libretuya=debug")
    } else {
        EnvFilter::new("libretuya=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let color = !cli.no_color && std::io::stderr().is_terminal();
    let description = cli.command.description_path().map(|p| p.to_path_buf());

    if let Err(e) = run(cli.command) {
        match e.downcast_ref::<ConfigError>() {
            Some(config_err) => {
                let mut diag = config_err.to_diagnostic();
                if let Some(path) = description {
                    diag = diag.with_location(path);
                }
                emit(&diag, color);
            }
            None => emit_error(&format!("{:#}", e), &[], &[], color),
        }
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Flags(args) => commands::flags::execute(args),
        Commands::Generate(args) => commands::generate::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
