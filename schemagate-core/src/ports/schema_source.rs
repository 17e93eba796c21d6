// schemagate-core/src/ports/schema_source.rs

// How the server obtains its executable schema and keeps it current.
// The request path only ever sees the resulting `ServiceConfig`.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::config::ApolloConfig;
use crate::domain::error::DomainError;
use crate::domain::schema::{ApiSchema, SchemaContext, ServiceConfig};
use crate::domain::subscription::{Listener, NotificationCapability, SubscriptionToken};

#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Produces the schema to serve. A failure here is fatal to startup and
    /// is never retried by the source itself.
    async fn load(&self, apollo: &ApolloConfig) -> Result<ServiceConfig, DomainError>;

    /// Change notifications, if this source refreshes at all.
    /// `None` means "load once, never refreshes".
    fn notifier(&self) -> Option<&dyn SchemaNotifier> {
        None
    }

    /// Ends background activity. Safe before `load`, and every call after the
    /// first returns the first call's outcome.
    async fn stop(&self) -> Result<(), DomainError>;

    fn name(&self) -> &str;
}

pub trait SchemaNotifier: Send + Sync {
    fn capability(&self) -> NotificationCapability;

    fn subscribe(&self, listener: Listener) -> Result<SubscriptionToken, DomainError>;

    /// Idempotent: `true` only for the call that removed the listener.
    fn release(&self, token: SubscriptionToken) -> bool;
}

impl dyn SchemaNotifier + '_ {
    /// Deprecated form: receives the API schema only.
    pub fn on_schema_change<F>(&self, callback: F) -> Result<SubscriptionToken, DomainError>
    where
        F: Fn(Arc<ApiSchema>) + Send + Sync + 'static,
    {
        self.subscribe(Listener::Legacy(Box::new(callback)))
    }

    pub fn on_schema_load_or_update<F>(
        &self,
        callback: F,
    ) -> Result<SubscriptionToken, DomainError>
    where
        F: Fn(&SchemaContext) + Send + Sync + 'static,
    {
        self.subscribe(Listener::Full(Box::new(callback)))
    }
}
