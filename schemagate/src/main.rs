// schemagate/src/main.rs

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug schemagate watch ... pour voir les détails
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: ONE-SHOT LOAD ---
        Commands::Check { config_dir } => commands::check::execute(config_dir).await,

        // --- USE CASE: LONG-RUNNING SCHEMA LIFECYCLE ---
        Commands::Watch {
            config_dir,
            exit_after_secs,
        } => commands::watch::execute(config_dir, exit_after_secs).await,
    }
}
