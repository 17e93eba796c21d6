// schemagate-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(schemagate::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(schemagate::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(schemagate::infra::validation))]
    Validation(#[from] validator::ValidationErrors),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Server configuration not found at '{0}'")]
    #[diagnostic(code(schemagate::infra::config_missing))]
    ConfigNotFound(String),
}
