// schemagate-core/src/application/wiring.rs
//
// Turns a `ServerConfig` into concrete adapters. Relative paths resolve
// against the directory holding the configuration.

use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::application::host::ServerHost;
use crate::domain::config::{ApolloConfig, SchemaSourceConfig, ServerConfig};
use crate::error::SchemaGateError;
use crate::infrastructure::adapters::{
    FileSupergraphFetcher, GatewaySchemaSource, LruDocumentStore, StaticSchemaSource,
};
use crate::ports::document_store::DocumentStore;
use crate::ports::plugin::PluginDefinition;
use crate::ports::schema_source::SchemaSource;

#[instrument(skip(config, base_dir))]
pub async fn build_schema_source(
    config: &ServerConfig,
    base_dir: &Path,
) -> Result<Arc<dyn SchemaSource>, SchemaGateError> {
    let source: Arc<dyn SchemaSource> = match &config.schema {
        SchemaSourceConfig::Static { sdl_path } => {
            let path = base_dir.join(sdl_path);
            info!(path = ?path, "Using static schema");
            Arc::new(StaticSchemaSource::from_file(&path).await?)
        }
        SchemaSourceConfig::Gateway {
            supergraph_path, ..
        } => {
            let path = base_dir.join(supergraph_path);
            info!(path = ?path, poll = ?config.schema.poll_interval(), "Using gateway schema");
            Arc::new(
                GatewaySchemaSource::new(FileSupergraphFetcher::new(path))
                    .with_poll_interval(config.schema.poll_interval()),
            )
        }
    };
    Ok(source)
}

/// `None` when the configuration disables caching.
pub fn build_document_store(config: &ServerConfig) -> Option<Arc<dyn DocumentStore>> {
    config.document_store.as_ref().map(|store| {
        info!(max_size = store.max_size, ttl = ?store.ttl(), "Document store enabled");
        Arc::new(LruDocumentStore::from_config(store)) as Arc<dyn DocumentStore>
    })
}

pub async fn build_host(
    config: &ServerConfig,
    base_dir: &Path,
    plugins: Vec<PluginDefinition>,
) -> Result<ServerHost, SchemaGateError> {
    let source = build_schema_source(config, base_dir).await?;
    Ok(ServerHost::new(source, ApolloConfig::resolve(&config.apollo))
        .with_document_store(build_document_store(config))
        .with_plugins(plugins))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::subscription::NotificationCapability;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn config(yaml: &str) -> Result<ServerConfig> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    #[tokio::test]
    async fn test_static_config_builds_static_host() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("schema.graphql"), "type Query { a: Int }")?;
        let config = config("schema:\n  kind: static\n  sdl-path: schema.graphql\n")?;

        let host = build_host(&config, dir.path(), vec![]).await?;
        let service = host.start().await?;

        assert_eq!(host.source().name(), "static");
        assert_eq!(host.capability(), NotificationCapability::None);
        assert_eq!(service.schema.type_names(), vec!["Query"]);
        assert!(host.document_store().is_some());
        host.stop().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_gateway_config_follows_file_changes() -> Result<()> {
        let dir = tempdir()?;
        let supergraph = dir.path().join("supergraph.graphql");
        fs::write(&supergraph, "type Query { a: Int }")?;
        let config = config(
            "schema:\n  kind: gateway\n  supergraph-path: supergraph.graphql\ndocument-store: null\n",
        )?;

        let source = build_schema_source(&config, dir.path()).await?;
        assert_eq!(source.name(), "gateway");
        assert_eq!(
            source.notifier().map(|n| n.capability()),
            Some(NotificationCapability::Full)
        );
        assert!(build_document_store(&config).is_none());

        let host = ServerHost::new(source, ApolloConfig::default());
        host.start().await?;
        assert_eq!(host.current()?.schema.sdl(), "type Query { a: Int }");
        host.stop().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_static_schema_file_fails() -> Result<()> {
        let dir = tempdir()?;
        let config = config("schema:\n  kind: static\n  sdl-path: nowhere.graphql\n")?;

        let result = build_schema_source(&config, dir.path()).await;
        assert!(matches!(result, Err(SchemaGateError::Infrastructure(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_supergraph_fails_at_start() -> Result<()> {
        let dir = tempdir()?;
        let config = config("schema:\n  kind: gateway\n  supergraph-path: nowhere.graphql\n")?;

        let host = build_host(&config, dir.path(), vec![]).await?;
        let err = host.start().await.unwrap_err();
        assert!(err.to_string().contains("Schema load failed"));
        host.stop().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_start_succeeds_once_supergraph_appears() -> Result<()> {
        let dir = tempdir()?;
        let config = config("schema:
  kind: gateway
  supergraph-path: supergraph.graphql
")?;
        let host = build_host(&config, dir.path(), vec![]).await?;

        assert!(host.start().await.is_err());

        fs::write(dir.path().join("supergraph.graphql"), "type Query { a: Int }")?;
        let service = host.start().await?;
        assert_eq!(service.schema.generation(), 1);
        assert_eq!(service.schema.type_names(), vec!["Query"]);
        host.stop().await?;
        Ok(())
    }
}
