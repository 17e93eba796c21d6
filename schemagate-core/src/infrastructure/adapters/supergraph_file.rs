// schemagate-core/src/infrastructure/adapters/supergraph_file.rs

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::domain::config::ApolloConfig;
use crate::domain::error::DomainError;
use crate::ports::fetcher::SupergraphFetcher;

/// Reads the composed supergraph from disk on every fetch, so an operator
/// can publish a new composition by replacing the file.
pub struct FileSupergraphFetcher {
    path: PathBuf,
}

impl FileSupergraphFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SupergraphFetcher for FileSupergraphFetcher {
    async fn fetch(&self, _apollo: &ApolloConfig) -> Result<String, DomainError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DomainError::Fetch(format!("{}: {}", self.path.display(), e)))
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
