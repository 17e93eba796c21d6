// schemagate/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "schemagate")]
#[command(about = "Schema sources and document caching for GraphQL servers", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔎 Loads the configured schema once, prints a summary, then stops
    Check {
        /// Directory containing schemagate.yaml
        #[arg(long, default_value = ".")]
        config_dir: PathBuf,
    },

    /// 👀 Serves the schema lifecycle and reports every update until stopped
    Watch {
        /// Directory containing schemagate.yaml
        #[arg(long, default_value = ".")]
        config_dir: PathBuf,

        /// Stop on its own after this many seconds
        #[arg(long)]
        exit_after_secs: Option<u64>,
    },
}
