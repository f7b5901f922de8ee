//! jspack CLI - resolve and concatenate source packages

use anyhow::Result;
use clap::Parser;
use jspack::util::diagnostic::{emit, Diagnostic};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            emit(&Diagnostic::error(format!("{:#}", e)), false);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("jspack=debug")
    } else {
        EnvFilter::new("jspack=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let global = cli.global();

    // Execute command
    match cli.command {
        Commands::Build(args) => commands::build::execute(args, &global),
        Commands::Resolve(args) => commands::resolve::execute(args, &global),
        Commands::Validate(args) => commands::validate::execute(args, &global),
        Commands::List(args) => commands::list::execute(args, &global),
    }
}
