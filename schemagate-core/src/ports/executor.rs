// schemagate-core/src/ports/executor.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::document::ParsedDocument;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub document: Arc<ParsedDocument>,
    pub operation_name: Option<String>,
    pub variables: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Runs an operation against the schema it was loaded alongside.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionResult, DomainError>;
}
