// schemagate-core/src/ports/plugin.rs

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::error::DomainError;
use crate::domain::schema::SchemaContext;

/// Server lifecycle hooks. Every hook defaults to a no-op.
#[async_trait]
pub trait ServerPlugin: Send + Sync {
    fn name(&self) -> &str;

    /// A failure aborts startup.
    async fn server_will_start(&self) -> Result<(), DomainError> {
        Ok(())
    }

    /// Called once per schema generation, the initial load included.
    async fn schema_did_load_or_update(&self, _ctx: &SchemaContext) {}

    async fn server_will_stop(&self) {}
}

pub type PluginFactory = Box<dyn Fn() -> Arc<dyn ServerPlugin> + Send + Sync>;

/// A plugin instance, or a factory invoked once when the host is built.
pub enum PluginDefinition {
    Instance(Arc<dyn ServerPlugin>),
    Factory(PluginFactory),
}

impl PluginDefinition {
    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn() -> Arc<dyn ServerPlugin> + Send + Sync + 'static,
    {
        PluginDefinition::Factory(Box::new(factory))
    }

    pub fn resolve(self) -> Arc<dyn ServerPlugin> {
        match self {
            PluginDefinition::Instance(plugin) => plugin,
            PluginDefinition::Factory(factory) => factory(),
        }
    }
}

impl From<Arc<dyn ServerPlugin>> for PluginDefinition {
    fn from(plugin: Arc<dyn ServerPlugin>) -> Self {
        PluginDefinition::Instance(plugin)
    }
}
