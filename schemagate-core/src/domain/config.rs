// schemagate-core/src/domain/config.rs

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use std::time::Duration;
use validator::{Validate, ValidationError};

/// Default bound of the in-process document store (30 MiB of serialized ASTs).
pub const DEFAULT_DOCUMENT_STORE_SIZE: usize = 30 * 1024 * 1024;

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ServerConfig {
    #[serde(default = "default_name")]
    #[validate(length(min = 1, message = "Server name cannot be empty"))]
    pub name: String,

    #[validate(custom(function = "validate_schema_source"))]
    pub schema: SchemaSourceConfig,

    // Missing key -> default store, explicit `null` -> caching disabled.
    #[serde(rename = "document-store", default = "default_document_store")]
    #[validate(nested)]
    pub document_store: Option<DocumentStoreConfig>,

    #[serde(default)]
    pub apollo: ApolloConfigInput,

    #[serde(default)]
    pub introspection: Option<bool>,

    #[serde(rename = "node-env", default)]
    pub node_env: Option<String>,

    #[serde(rename = "stop-on-termination-signals", default)]
    pub stop_on_termination_signals: Option<bool>,
}

impl ServerConfig {
    /// Introspection stays on unless explicitly disabled or running in production.
    pub fn introspection_enabled(&self) -> bool {
        self.introspection
            .unwrap_or_else(|| self.node_env.as_deref() != Some("production"))
    }

    /// Signal handlers are installed by default, except under test.
    pub fn stops_on_termination_signals(&self) -> bool {
        self.stop_on_termination_signals
            .unwrap_or_else(|| self.node_env.as_deref() != Some("test"))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SchemaSourceConfig {
    /// Schema read once from an SDL file.
    Static {
        #[serde(rename = "sdl-path")]
        sdl_path: String,
    },
    /// Composed supergraph, optionally re-fetched on an interval.
    Gateway {
        #[serde(rename = "supergraph-path")]
        supergraph_path: String,
        #[serde(rename = "poll-interval-secs", default)]
        poll_interval_secs: Option<u64>,
    },
}

impl SchemaSourceConfig {
    pub fn poll_interval(&self) -> Option<Duration> {
        match self {
            SchemaSourceConfig::Static { .. } => None,
            SchemaSourceConfig::Gateway {
                poll_interval_secs, ..
            } => poll_interval_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate, PartialEq)]
pub struct DocumentStoreConfig {
    #[serde(rename = "max-size", default = "default_max_size")]
    #[validate(range(min = 1, message = "Document store size must be positive"))]
    pub max_size: usize,

    #[serde(rename = "ttl-secs", default)]
    pub ttl_secs: Option<u64>,
}

impl DocumentStoreConfig {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_DOCUMENT_STORE_SIZE,
            ttl_secs: None,
        }
    }
}

/// Identity as written by the operator (file or environment).
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ApolloConfigInput {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(rename = "graph-ref", default)]
    pub graph_ref: Option<String>,
}

/// Resolved identity handed to `SchemaSource::load`.
#[derive(Clone, Default, PartialEq)]
pub struct ApolloConfig {
    pub key: Option<String>,
    pub key_hash: Option<String>,
    pub graph_ref: Option<String>,
}

impl ApolloConfig {
    pub fn resolve(input: &ApolloConfigInput) -> Self {
        let key_hash = input.key.as_deref().map(|key| {
            let digest = Sha512::digest(key.as_bytes());
            format!("{:x}", digest)
        });
        Self {
            key: input.key.clone(),
            key_hash,
            graph_ref: input.graph_ref.clone(),
        }
    }
}

// The key is a secret: never print it.
impl std::fmt::Debug for ApolloConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApolloConfig")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("key_hash", &self.key_hash)
            .field("graph_ref", &self.graph_ref)
            .finish()
    }
}

fn validate_schema_source(source: &SchemaSourceConfig) -> Result<(), ValidationError> {
    let path = match source {
        SchemaSourceConfig::Static { sdl_path } => sdl_path,
        SchemaSourceConfig::Gateway {
            supergraph_path,
            poll_interval_secs,
        } => {
            if *poll_interval_secs == Some(0) {
                return Err(ValidationError::new("poll_interval")
                    .with_message("Poll interval must be at least one second".into()));
            }
            supergraph_path
        }
    };
    if path.trim().is_empty() {
        return Err(ValidationError::new("schema_path")
            .with_message("Schema path cannot be empty".into()));
    }
    Ok(())
}

fn default_name() -> String {
    "schemagate".to_string()
}
fn default_document_store() -> Option<DocumentStoreConfig> {
    Some(DocumentStoreConfig::default())
}
fn default_max_size() -> usize {
    DEFAULT_DOCUMENT_STORE_SIZE
}
