pub mod config;
pub mod document;
pub mod error;
pub mod schema;
pub mod subscription;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use config::{ApolloConfig, ApolloConfigInput, DocumentStoreConfig, SchemaSourceConfig, ServerConfig};
pub use document::{CacheOptions, ParsedDocument};
pub use error::DomainError;
pub use schema::{ApiSchema, SchemaContext, ServiceConfig};
pub use subscription::{Listener, ListenerRegistry, NotificationCapability, SubscriptionToken};
