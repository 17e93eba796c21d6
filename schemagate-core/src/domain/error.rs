// schemagate-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

use crate::domain::subscription::NotificationCapability;

// Clone: the outcome of `stop()` is cached and handed back on every call.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum DomainError {
    #[error("Schema load failed: {0}")]
    #[diagnostic(
        code(schemagate::domain::schema_load),
        help("The schema source could not produce an initial schema. The server cannot start.")
    )]
    SchemaLoad(String),

    #[error("Supergraph fetch failed: {0}")]
    #[diagnostic(code(schemagate::domain::fetch))]
    Fetch(String),

    #[error("Invalid schema: {0}")]
    #[diagnostic(code(schemagate::domain::invalid_schema))]
    InvalidSchema(String),

    #[error("Schema source does not support '{requested}' notifications (supports '{supported}')")]
    #[diagnostic(
        code(schemagate::domain::capability),
        help("Probe `SchemaNotifier::capability()` before subscribing.")
    )]
    UnsupportedCapability {
        requested: NotificationCapability,
        supported: NotificationCapability,
    },

    #[error("Schema source failed to stop: {0}")]
    #[diagnostic(code(schemagate::domain::stop))]
    StopFailed(String),

    #[error("{0} has not been started")]
    #[diagnostic(code(schemagate::domain::not_started))]
    NotStarted(String),

    #[error("{0} has already been stopped")]
    #[diagnostic(code(schemagate::domain::stopped))]
    AlreadyStopped(String),

    #[error("Execution failed: {0}")]
    #[diagnostic(code(schemagate::domain::execution))]
    Execution(String),

    #[error("Document error: {0}")]
    #[diagnostic(code(schemagate::domain::document))]
    Document(String),

    #[error("Plugin '{plugin}' failed: {message}")]
    #[diagnostic(code(schemagate::domain::plugin))]
    Plugin { plugin: String, message: String },
}
