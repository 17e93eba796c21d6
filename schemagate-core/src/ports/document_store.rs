// schemagate-core/src/ports/document_store.rs

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::document::{CacheOptions, ParsedDocument};
use crate::domain::error::DomainError;

/// Parsed documents keyed by raw query text.
///
/// A missing key is `Ok(None)`, never an error. `total_size` counts exactly
/// the entries `get` would currently return.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Arc<ParsedDocument>>, DomainError>;

    async fn set(
        &self,
        key: &str,
        value: Arc<ParsedDocument>,
        options: CacheOptions,
    ) -> Result<(), DomainError>;

    async fn delete(&self, key: &str) -> Result<(), DomainError>;

    async fn clear(&self) -> Result<(), DomainError>;

    /// Synchronous, never does I/O.
    fn total_size(&self) -> usize;
}
