// schemagate-core/src/infrastructure/config/server.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::config::ServerConfig;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["schemagate.yaml", "schemagate.yml"];

// --- LOADER ---

#[instrument(skip(server_dir))]
pub fn load_server_config(server_dir: &Path) -> Result<ServerConfig, InfrastructureError> {
    // 1. Découverte du fichier principal
    let config_path = find_main_config(server_dir)?;
    load_server_config_file(&config_path)
}

#[instrument]
pub fn load_server_config_file(config_path: &Path) -> Result<ServerConfig, InfrastructureError> {
    info!(path = ?config_path, "Loading server configuration");

    // 2. Chargement YAML
    let content = fs::read_to_string(config_path)?;
    let mut config: ServerConfig = serde_yaml::from_str(&content)?;

    // 3. Override via Variables d'Environnement (Pattern 'Layering')
    // APOLLO_KEY=... schemagate check
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    // 4. Validation (après overrides: l'environnement ne doit pas contourner les règles)
    config.validate()?;

    Ok(config)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    for filename in CONFIG_CANDIDATES {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, CONFIG_CANDIDATES
    )))
}

fn apply_env_overrides<F>(config: &mut ServerConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("APOLLO_KEY") {
        info!("Overriding Apollo key via ENV");
        config.apollo.key = Some(val);
    }
    if let Some(val) = lookup("APOLLO_GRAPH_REF") {
        info!(old = ?config.apollo.graph_ref, new = ?val, "Overriding graph ref via ENV");
        config.apollo.graph_ref = Some(val);
    }
    if let Some(val) = lookup("NODE_ENV") {
        info!(old = ?config.node_env, new = ?val, "Overriding node env via ENV");
        config.node_env = Some(val);
    }
}
