// schemagate-core/src/ports/mod.rs

pub mod document_store;
pub mod executor;
pub mod fetcher;
pub mod plugin;
pub mod schema_source;

pub use document_store::DocumentStore;
pub use executor::{ExecutionRequest, ExecutionResult, Executor};
pub use fetcher::SupergraphFetcher;
pub use plugin::{PluginDefinition, ServerPlugin};
pub use schema_source::{SchemaNotifier, SchemaSource};
