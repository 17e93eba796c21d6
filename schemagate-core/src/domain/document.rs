// schemagate-core/src/domain/document.rs

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Parsed representation of a query string, as produced by the execution
/// engine. Reusable across requests carrying identical query text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub struct ParsedDocument {
    ast: serde_json::Value,
    size: usize,
}

impl ParsedDocument {
    pub fn new(ast: serde_json::Value) -> Self {
        // Unit = bytes of the compact JSON rendering of the AST.
        let size = ast.to_string().len();
        Self { ast, size }
    }

    pub fn ast(&self) -> &serde_json::Value {
        &self.ast
    }

    pub fn approximate_size(&self) -> usize {
        self.size
    }
}

impl From<serde_json::Value> for ParsedDocument {
    fn from(ast: serde_json::Value) -> Self {
        Self::new(ast)
    }
}

impl From<ParsedDocument> for serde_json::Value {
    fn from(doc: ParsedDocument) -> Self {
        doc.ast
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheOptions {
    /// After this long the entry reads as absent, purged or not.
    pub ttl: Option<Duration>,
}

impl CacheOptions {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl: Some(ttl) }
    }
}
