// schemagate-core/src/domain/schema.rs

use std::fmt;
use std::sync::Arc;

use crate::domain::error::DomainError;
use crate::ports::executor::Executor;

const DEFINITION_KEYWORDS: [&str; 6] = ["type", "interface", "enum", "input", "union", "scalar"];

/// Compiled, immutable schema handle served to requests.
///
/// The generation number is assigned by the schema source that produced it
/// and strictly increases with every change, so holders can tell which of two
/// schemas is the most recent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSchema {
    sdl: Arc<str>,
    generation: u64,
}

impl ApiSchema {
    pub fn from_sdl(sdl: impl Into<String>, generation: u64) -> Result<Self, DomainError> {
        let sdl = sdl.into();
        if sdl.trim().is_empty() {
            return Err(DomainError::InvalidSchema(
                "schema document is empty".to_string(),
            ));
        }
        Ok(Self {
            sdl: Arc::from(sdl),
            generation,
        })
    }

    pub fn sdl(&self) -> &str {
        &self.sdl
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Named type definitions, in document order, without duplicates
    /// (`extend type Query` does not add a second `Query`).
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let mut tokens = self
            .sdl
            .split(|c: char| c.is_whitespace() || matches!(c, '{' | '=' | '(' | ')'))
            .filter(|t| !t.is_empty())
            .peekable();

        while let Some(token) = tokens.next() {
            if DEFINITION_KEYWORDS.contains(&token)
                && let Some(name) = tokens.peek()
                && !name.starts_with('@')
                && !names.contains(name)
            {
                names.push(*name);
            }
        }
        names
    }
}

/// What a notifying source pushes on every load or update.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaContext {
    pub api_schema: Arc<ApiSchema>,
    /// Raw composed document the API schema was derived from.
    pub core_supergraph_sdl: Arc<str>,
}

impl SchemaContext {
    /// Context for sources that only hand out the schema itself.
    pub fn from_api_schema(api_schema: Arc<ApiSchema>) -> Self {
        let core_supergraph_sdl = Arc::from(api_schema.sdl());
        Self {
            api_schema,
            core_supergraph_sdl,
        }
    }
}

/// Result of a successful `SchemaSource::load`.
///
/// `executor: None` means the caller executes directly against `schema`.
#[derive(Clone)]
pub struct ServiceConfig {
    pub schema: Arc<ApiSchema>,
    pub executor: Option<Arc<dyn Executor>>,
}

impl ServiceConfig {
    pub fn schema_only(schema: Arc<ApiSchema>) -> Self {
        Self {
            schema,
            executor: None,
        }
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("generation", &self.schema.generation())
            .field("executor", &self.executor.is_some())
            .finish()
    }
}
