//! Wrangle CLI - dataset profiling and cleaning suggestions.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Profile { file, json } => commands::profile::run(file, json),

        Commands::Suggest {
            file,
            max_suggestions,
            learned,
            model,
            json,
        } => commands::suggest::run(file, max_suggestions, learned, model, json),

        Commands::Apply { file, pick, output } => commands::apply::run(file, pick, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
