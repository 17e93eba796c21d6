// schemagate-core/src/ports/fetcher.rs

use async_trait::async_trait;

use crate::domain::config::ApolloConfig;
use crate::domain::error::DomainError;

/// Where a refreshing source gets its composed supergraph document from.
#[async_trait]
pub trait SupergraphFetcher: Send + Sync {
    async fn fetch(&self, apollo: &ApolloConfig) -> Result<String, DomainError>;

    fn describe(&self) -> String;
}
