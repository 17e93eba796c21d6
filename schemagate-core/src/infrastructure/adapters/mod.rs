// schemagate-core/src/infrastructure/adapters/mod.rs

pub mod gateway;
pub mod lru_store;
pub mod static_source;
pub mod supergraph_file;

pub use gateway::GatewaySchemaSource;
pub use lru_store::LruDocumentStore;
pub use static_source::StaticSchemaSource;
pub use supergraph_file::FileSupergraphFetcher;
