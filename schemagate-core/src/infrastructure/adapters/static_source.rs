// schemagate-core/src/infrastructure/adapters/static_source.rs

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::config::ApolloConfig;
use crate::domain::error::DomainError;
use crate::domain::schema::{ApiSchema, ServiceConfig};
use crate::infrastructure::error::InfrastructureError;
use crate::ports::schema_source::SchemaSource;

/// A schema fixed at construction. No notifier: it never refreshes.
pub struct StaticSchemaSource {
    schema: Arc<ApiSchema>,
}

impl StaticSchemaSource {
    pub fn new(schema: ApiSchema) -> Self {
        Self {
            schema: Arc::new(schema),
        }
    }

    pub fn from_sdl(sdl: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self::new(ApiSchema::from_sdl(sdl, 0)?))
    }

    pub async fn from_file(path: &Path) -> Result<Self, InfrastructureError> {
        let sdl = tokio::fs::read_to_string(path).await?;
        Self::from_sdl(sdl).map_err(|e| {
            InfrastructureError::ConfigError(format!("{}: {}", path.display(), e))
        })
    }
}

#[async_trait]
impl SchemaSource for StaticSchemaSource {
    async fn load(&self, _apollo: &ApolloConfig) -> Result<ServiceConfig, DomainError> {
        info!(
            types = self.schema.type_names().len(),
            "Serving static schema"
        );
        Ok(ServiceConfig::schema_only(Arc::clone(&self.schema)))
    }

    async fn stop(&self) -> Result<(), DomainError> {
        debug!("Static schema source has nothing to stop");
        Ok(())
    }

    fn name(&self) -> &str {
        "static"
    }
}
