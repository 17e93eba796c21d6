// schemagate-core/src/application/mod.rs

pub mod host;
pub mod wiring;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use schemagate_core::application::{ServerHost, build_host};`

pub use host::{PreparedOperation, ServerHost};
pub use wiring::{build_document_store, build_host, build_schema_source};
