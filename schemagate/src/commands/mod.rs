// schemagate/src/commands/mod.rs

pub mod check;
pub mod watch;

use std::path::Path;

use anyhow::Context;
use schemagate_core::domain::ServerConfig;
use schemagate_core::infrastructure::config::load_server_config;

pub(crate) fn load_config(config_dir: &Path) -> anyhow::Result<ServerConfig> {
    println!("⚙️  Loading configuration...");
    let config = load_server_config(config_dir).with_context(|| {
        format!(
            "Failed to load server configuration from {:?}",
            config_dir
        )
    })?;
    println!("   Server: {}", config.name);
    Ok(config)
}
