// schemagate-core/src/application/host.rs
//
// USE CASE: own one schema source and at most one document store for the
// lifetime of a server, and hand requests a consistent view of both.

use arc_swap::ArcSwapOption;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tokio::sync::{OnceCell, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::config::ApolloConfig;
use crate::domain::document::{CacheOptions, ParsedDocument};
use crate::domain::error::DomainError;
use crate::domain::schema::{ApiSchema, SchemaContext, ServiceConfig};
use crate::domain::subscription::{NotificationCapability, SubscriptionToken};
use crate::error::SchemaGateError;
use crate::ports::document_store::DocumentStore;
use crate::ports::executor::Executor;
use crate::ports::plugin::{PluginDefinition, ServerPlugin};
use crate::ports::schema_source::SchemaSource;

/// Everything a request needs to run an operation.
#[derive(Debug, Clone)]
pub struct PreparedOperation {
    pub service: Arc<ServiceConfig>,
    pub document: Arc<ParsedDocument>,
}

impl PreparedOperation {
    pub fn schema(&self) -> &ApiSchema {
        &self.service.schema
    }

    /// `None`: run the document directly against `schema()`.
    pub fn executor(&self) -> Option<&Arc<dyn Executor>> {
        self.service.executor.as_ref()
    }
}

enum HookMessage {
    Schema(SchemaContext),
    Shutdown,
}

struct HostState {
    current: ArcSwapOption<ServiceConfig>,
}

impl HostState {
    /// Installs a pushed schema unless something at least as recent is
    /// already serving. Returns whether it was installed.
    fn apply_update(&self, schema: &Arc<ApiSchema>) -> bool {
        let previous = self.current.rcu(|current| match current {
            Some(c) if c.schema.generation() >= schema.generation() => Some(Arc::clone(c)),
            Some(c) => Some(Arc::new(ServiceConfig {
                schema: Arc::clone(schema),
                executor: c.executor.clone(),
            })),
            None => Some(Arc::new(ServiceConfig::schema_only(Arc::clone(schema)))),
        });
        previous
            .as_ref()
            .is_none_or(|p| p.schema.generation() < schema.generation())
    }

    /// Installs the result of `load`. A newer pushed schema wins over the
    /// loaded one, but the loaded executor is always kept.
    fn install_loaded(&self, loaded: &ServiceConfig) {
        self.current.rcu(|current| match current {
            Some(c) if c.schema.generation() > loaded.schema.generation() => {
                Some(Arc::new(ServiceConfig {
                    schema: Arc::clone(&c.schema),
                    executor: loaded.executor.clone(),
                }))
            }
            _ => Some(Arc::new(loaded.clone())),
        });
    }
}

pub struct ServerHost {
    source: Arc<dyn SchemaSource>,
    document_store: Option<Arc<dyn DocumentStore>>,
    plugins: Arc<Vec<Arc<dyn ServerPlugin>>>,
    apollo: ApolloConfig,
    state: Arc<HostState>,
    subscription: Mutex<Option<SubscriptionToken>>,
    hooks: tokio::sync::Mutex<Option<(mpsc::UnboundedSender<HookMessage>, JoinHandle<()>)>>,
    started: OnceCell<()>,
    stopped: OnceCell<Result<(), DomainError>>,
}

impl ServerHost {
    pub fn new(source: Arc<dyn SchemaSource>, apollo: ApolloConfig) -> Self {
        Self {
            source,
            document_store: None,
            plugins: Arc::new(Vec::new()),
            apollo,
            state: Arc::new(HostState {
                current: ArcSwapOption::empty(),
            }),
            subscription: Mutex::new(None),
            hooks: tokio::sync::Mutex::new(None),
            started: OnceCell::new(),
            stopped: OnceCell::new(),
        }
    }

    /// `None` disables caching entirely.
    pub fn with_document_store(mut self, store: Option<Arc<dyn DocumentStore>>) -> Self {
        self.document_store = store;
        self
    }

    /// Factories are invoked here, once.
    pub fn with_plugins(mut self, plugins: Vec<PluginDefinition>) -> Self {
        self.plugins = Arc::new(plugins.into_iter().map(PluginDefinition::resolve).collect());
        self
    }

    pub fn document_store(&self) -> Option<&Arc<dyn DocumentStore>> {
        self.document_store.as_ref()
    }

    pub fn source(&self) -> &dyn SchemaSource {
        self.source.as_ref()
    }

    /// What the host subscribed with; `None` for static sources.
    pub fn capability(&self) -> NotificationCapability {
        self.source
            .notifier()
            .map_or(NotificationCapability::None, |n| n.capability())
    }

    /// Last successfully loaded configuration.
    pub fn current(&self) -> Result<Arc<ServiceConfig>, DomainError> {
        self.state
            .current
            .load_full()
            .ok_or_else(|| DomainError::NotStarted("server host".to_string()))
    }

    /// Runs startup hooks, subscribes to schema changes, then loads.
    ///
    /// A failure is returned as is and leaves the host unstarted: the caller
    /// decides whether to abort or call `start` again.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn start(&self) -> Result<Arc<ServiceConfig>, SchemaGateError> {
        if self.stopped.initialized() {
            return Err(DomainError::AlreadyStopped("server host".to_string()).into());
        }
        self.started.get_or_try_init(|| self.start_once()).await?;
        Ok(self.current()?)
    }

    async fn start_once(&self) -> Result<(), SchemaGateError> {
        let start = Instant::now();

        for plugin in self.plugins.iter() {
            plugin.server_will_start().await.map_err(|e| {
                error!(plugin = plugin.name(), "❌ Plugin refused to start: {}", e);
                e
            })?;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let pump = tokio::spawn(run_schema_hooks(
            rx,
            self.document_store.clone(),
            Arc::clone(&self.plugins),
        ));
        *self.hooks.lock().await = Some((tx.clone(), pump));

        // Subscribe before loading so no change between the two is missed.
        let loaded = match self.subscribe(tx.clone()) {
            Ok(()) => self.source.load(&self.apollo).await,
            Err(e) => Err(e),
        };
        let loaded = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                error!("❌ Schema source failed to load: {}", e);
                self.abandon_start().await;
                return Err(e.into());
            }
        };
        self.state.install_loaded(&loaded);

        let current = self.current()?;
        let _ = tx.send(HookMessage::Schema(SchemaContext::from_api_schema(
            Arc::clone(&current.schema),
        )));

        info!(
            generation = current.schema.generation(),
            executor = current.executor.is_some(),
            caching = self.document_store.is_some(),
            "🚀 Server host started in {:.2?}",
            start.elapsed()
        );
        Ok(())
    }

    // Undoes a failed attempt so the next `start` begins from scratch.
    async fn abandon_start(&self) {
        self.release_subscription();
        self.drain_hooks().await;
        self.state.current.store(None);
    }

    fn release_subscription(&self) {
        let token = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let (Some(notifier), Some(token)) = (self.source.notifier(), token) {
            notifier.release(token);
        }
    }

    async fn drain_hooks(&self) {
        let hooks = self.hooks.lock().await.take();
        if let Some((tx, pump)) = hooks {
            let _ = tx.send(HookMessage::Shutdown);
            if let Err(e) = pump.await {
                warn!("Schema hook task ended abnormally: {}", e);
            }
        }
    }

    fn subscribe(&self, tx: mpsc::UnboundedSender<HookMessage>) -> Result<(), DomainError> {
        let Some(notifier) = self.source.notifier() else {
            info!("Static schema source: the schema will not refresh");
            return Ok(());
        };

        let state = Arc::clone(&self.state);
        let token = match notifier.capability() {
            NotificationCapability::Full => {
                notifier.on_schema_load_or_update(move |ctx: &SchemaContext| {
                    if state.apply_update(&ctx.api_schema) {
                        let _ = tx.send(HookMessage::Schema(ctx.clone()));
                    }
                })?
            }
            NotificationCapability::Legacy => {
                notifier.on_schema_change(move |schema: Arc<ApiSchema>| {
                    if state.apply_update(&schema) {
                        let ctx = SchemaContext::from_api_schema(schema);
                        let _ = tx.send(HookMessage::Schema(ctx));
                    }
                })?
            }
            NotificationCapability::None => return Ok(()),
        };

        *self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
        debug!(token = token.id(), "Subscribed to schema changes");
        Ok(())
    }

    /// Parsed document for `query`, from the store when possible.
    ///
    /// Store failures are logged and treated as misses: caching never fails
    /// a request.
    pub async fn document<P>(
        &self,
        query: &str,
        parse: P,
    ) -> Result<Arc<ParsedDocument>, DomainError>
    where
        P: FnOnce(&str) -> Result<ParsedDocument, DomainError>,
    {
        let Some(store) = &self.document_store else {
            return Ok(Arc::new(parse(query)?));
        };

        match store.get(query).await {
            Ok(Some(doc)) => {
                debug!(query.len = query.len(), "Document cache hit");
                return Ok(doc);
            }
            Ok(None) => {}
            Err(e) => warn!("Document cache read failed, parsing instead: {}", e),
        }

        let doc = Arc::new(parse(query)?);
        if let Err(e) = store.set(query, Arc::clone(&doc), CacheOptions::default()).await {
            warn!("Document cache write failed: {}", e);
        }
        Ok(doc)
    }

    /// Pairs the serving schema/executor with the parsed document.
    pub async fn prepare<P>(
        &self,
        query: &str,
        parse: P,
    ) -> Result<PreparedOperation, DomainError>
    where
        P: FnOnce(&str) -> Result<ParsedDocument, DomainError>,
    {
        let service = self.current()?;
        let document = self.document(query, parse).await?;
        Ok(PreparedOperation { service, document })
    }

    /// Releases the subscription, stops the source exactly once and drains
    /// pending hooks. Every call returns the first call's outcome.
    pub async fn stop(&self) -> Result<(), DomainError> {
        self.stopped
            .get_or_init(|| async {
                self.release_subscription();
                let outcome = self.source.stop().await;
                self.drain_hooks().await;

                for plugin in self.plugins.iter() {
                    plugin.server_will_stop().await;
                }

                match &outcome {
                    Ok(()) => info!("🛑 Server host stopped"),
                    Err(e) => error!("❌ Server host stopped with error: {}", e),
                }
                outcome
            })
            .await
            .clone()
    }
}

// Runs the async follow-ups of a schema change, in order, once per generation.
async fn run_schema_hooks(
    mut rx: mpsc::UnboundedReceiver<HookMessage>,
    document_store: Option<Arc<dyn DocumentStore>>,
    plugins: Arc<Vec<Arc<dyn ServerPlugin>>>,
) {
    let mut last_generation: Option<u64> = None;

    while let Some(message) = rx.recv().await {
        let ctx = match message {
            HookMessage::Schema(ctx) => ctx,
            HookMessage::Shutdown => break,
        };
        let generation = ctx.api_schema.generation();
        if last_generation.is_some_and(|last| last >= generation) {
            continue;
        }

        // Documents were cached against the previous schema.
        if last_generation.is_some()
            && let Some(store) = &document_store
            && let Err(e) = store.clear().await
        {
            warn!("Failed to clear document cache after schema update: {}", e);
        }
        last_generation = Some(generation);

        for plugin in plugins.iter() {
            plugin.schema_did_load_or_update(&ctx).await;
        }
        info!(generation, "Schema generation now serving");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::subscription::{Listener, ListenerRegistry};
    use crate::infrastructure::adapters::{LruDocumentStore, StaticSchemaSource};
    use crate::ports::executor::{ExecutionRequest, ExecutionResult};
    use crate::ports::schema_source::SchemaNotifier;
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    const S1: &str = "type Query { one: Int }";
    const S2: &str = "type Query { two: Int }";

    // --- MOCK SOURCE (pushes changes on demand) ---
    struct PushSource {
        registry: ListenerRegistry,
        initial: Arc<ApiSchema>,
        executor: Option<Arc<dyn Executor>>,
        fail_load: AtomicBool,
        stops: AtomicUsize,
    }

    impl PushSource {
        fn new(capability: NotificationCapability) -> Result<Self> {
            Ok(Self {
                registry: ListenerRegistry::new(capability),
                initial: Arc::new(ApiSchema::from_sdl(S1, 1)?),
                executor: None,
                fail_load: AtomicBool::new(false),
                stops: AtomicUsize::new(0),
            })
        }

        fn push(&self, sdl: &str, generation: u64) -> Result<()> {
            let schema = Arc::new(ApiSchema::from_sdl(sdl, generation)?);
            self.registry.notify(&SchemaContext::from_api_schema(schema));
            Ok(())
        }
    }

    #[async_trait]
    impl SchemaSource for PushSource {
        async fn load(&self, _apollo: &ApolloConfig) -> Result<ServiceConfig, DomainError> {
            if self.fail_load.load(Ordering::SeqCst) {
                return Err(DomainError::SchemaLoad("unreachable registry".into()));
            }
            Ok(ServiceConfig {
                schema: Arc::clone(&self.initial),
                executor: self.executor.clone(),
            })
        }

        fn notifier(&self) -> Option<&dyn SchemaNotifier> {
            Some(self)
        }

        async fn stop(&self) -> Result<(), DomainError> {
            self.stops.fetch_add(1, Ordering::SeqCst);
            self.registry.close();
            Ok(())
        }

        fn name(&self) -> &str {
            "push"
        }
    }

    impl SchemaNotifier for PushSource {
        fn capability(&self) -> NotificationCapability {
            self.registry.capability()
        }
        fn subscribe(&self, listener: Listener) -> Result<SubscriptionToken, DomainError> {
            self.registry.register(listener)
        }
        fn release(&self, token: SubscriptionToken) -> bool {
            self.registry.release(token)
        }
    }

    // --- MOCK PLUGIN ---
    #[derive(Default)]
    struct RecordingPlugin {
        events: Mutex<Vec<String>>,
        refuse_start: bool,
    }

    #[async_trait]
    impl ServerPlugin for RecordingPlugin {
        fn name(&self) -> &str {
            "recording"
        }

        async fn server_will_start(&self) -> Result<(), DomainError> {
            self.events.lock().unwrap().push("start".into());
            if self.refuse_start {
                return Err(DomainError::Plugin {
                    plugin: "recording".into(),
                    message: "no license".into(),
                });
            }
            Ok(())
        }

        async fn schema_did_load_or_update(&self, ctx: &SchemaContext) {
            self.events
                .lock()
                .unwrap()
                .push(format!("schema@{}", ctx.api_schema.generation()));
        }

        async fn server_will_stop(&self) {
            self.events.lock().unwrap().push("stop".into());
        }
    }

    struct ConstExecutor;

    #[async_trait]
    impl Executor for ConstExecutor {
        async fn execute(
            &self,
            _request: ExecutionRequest,
        ) -> Result<ExecutionResult, DomainError> {
            Ok(ExecutionResult {
                data: Some(json!({"ok": true})),
                errors: vec![],
            })
        }
    }

    fn parse_counting(
        counter: &AtomicUsize,
    ) -> impl FnOnce(&str) -> Result<ParsedDocument, DomainError> + '_ {
        move |query: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(ParsedDocument::new(json!({"source": query})))
        }
    }

    fn static_source() -> Result<Arc<dyn SchemaSource>> {
        Ok(Arc::new(StaticSchemaSource::from_sdl(S1)?))
    }

    #[tokio::test]
    async fn test_static_source_serves_loaded_schema() -> Result<()> {
        let source = Arc::new(StaticSchemaSource::from_sdl(S1)?);
        let host = ServerHost::new(source, ApolloConfig::default());

        let config = host.start().await?;

        assert_eq!(config.schema.sdl(), S1);
        assert!(config.executor.is_none());
        assert_eq!(host.capability(), NotificationCapability::None);
        host.stop().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_current_before_start_is_not_started() -> Result<()> {
        let host = ServerHost::new(static_source()?, ApolloConfig::default());
        assert!(matches!(host.current(), Err(DomainError::NotStarted(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_failure_is_fatal_and_stop_still_works() -> Result<()> {
        let source = Arc::new(PushSource::new(NotificationCapability::Full)?);
        source.fail_load.store(true, Ordering::SeqCst);
        let host = ServerHost::new(source.clone(), ApolloConfig::default());

        let err = host.start().await.unwrap_err();
        assert!(matches!(err, SchemaGateError::Domain(DomainError::SchemaLoad(_))));

        host.stop().await?;
        host.stop().await?;
        assert_eq!(source.stops.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_start_can_be_retried_after_load_failure() -> Result<()> {
        let source = Arc::new(PushSource::new(NotificationCapability::Full)?);
        source.fail_load.store(true, Ordering::SeqCst);
        let plugin = Arc::new(RecordingPlugin::default());
        let as_plugin: Arc<dyn ServerPlugin> = plugin.clone();
        let host = ServerHost::new(source.clone(), ApolloConfig::default())
            .with_plugins(vec![as_plugin.into()]);

        assert!(host.start().await.is_err());
        assert!(source.registry.is_empty());
        assert!(matches!(host.current(), Err(DomainError::NotStarted(_))));

        source.fail_load.store(false, Ordering::SeqCst);
        let config = host.start().await?;
        assert_eq!(config.schema.sdl(), S1);
        assert_eq!(source.registry.len(), 1);

        source.push(S2, 2)?;
        assert_eq!(host.current()?.schema.generation(), 2);
        host.stop().await?;

        assert_eq!(
            *plugin.events.lock().unwrap(),
            vec!["start", "start", "schema@1", "schema@2", "stop"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_pushed_update_swaps_schema_and_keeps_executor() -> Result<()> {
        let mut source = PushSource::new(NotificationCapability::Full)?;
        source.executor = Some(Arc::new(ConstExecutor));
        let source = Arc::new(source);
        let host = ServerHost::new(source.clone(), ApolloConfig::default());
        host.start().await?;

        source.push(S2, 2)?;

        let current = host.current()?;
        assert_eq!(current.schema.sdl(), S2);
        assert!(current.executor.is_some());

        // A late, older push never rolls the schema back.
        source.push(S1, 1)?;
        assert_eq!(host.current()?.schema.generation(), 2);
        host.stop().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_legacy_source_is_followed() -> Result<()> {
        let source = Arc::new(PushSource::new(NotificationCapability::Legacy)?);
        let host = ServerHost::new(source.clone(), ApolloConfig::default());
        host.start().await?;
        assert_eq!(host.capability(), NotificationCapability::Legacy);

        source.push(S2, 2)?;
        assert_eq!(host.current()?.schema.sdl(), S2);
        host.stop().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_stop_releases_subscription_once() -> Result<()> {
        let source = Arc::new(PushSource::new(NotificationCapability::Full)?);
        let host = ServerHost::new(source.clone(), ApolloConfig::default());
        host.start().await?;
        assert_eq!(source.registry.len(), 1);

        host.stop().await?;
        host.stop().await?;

        assert!(source.registry.is_empty());
        assert_eq!(source.stops.load(Ordering::SeqCst), 1);
        assert!(matches!(
            host.start().await,
            Err(SchemaGateError::Domain(DomainError::AlreadyStopped(_)))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_plugins_see_each_generation_once() -> Result<()> {
        let source = Arc::new(PushSource::new(NotificationCapability::Full)?);
        let plugin = Arc::new(RecordingPlugin::default());
        let as_plugin: Arc<dyn ServerPlugin> = plugin.clone();
        let host = ServerHost::new(source.clone(), ApolloConfig::default())
            .with_plugins(vec![as_plugin.into()]);

        host.start().await?;
        source.push(S2, 2)?;
        source.push(S2, 2)?;
        host.stop().await?;

        assert_eq!(
            *plugin.events.lock().unwrap(),
            vec!["start", "schema@1", "schema@2", "stop"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_plugin_factory_is_resolved_once() -> Result<()> {
        let built = Arc::new(AtomicUsize::new(0));
        let built_ref = built.clone();
        let host = ServerHost::new(static_source()?, ApolloConfig::default())
            .with_plugins(vec![PluginDefinition::factory(move || {
                built_ref.fetch_add(1, Ordering::SeqCst);
                Arc::new(RecordingPlugin::default()) as Arc<dyn ServerPlugin>
            })]);

        host.start().await?;
        host.stop().await?;
        assert_eq!(built.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_refusing_plugin_aborts_start() -> Result<()> {
        let plugin: Arc<dyn ServerPlugin> = Arc::new(RecordingPlugin {
            refuse_start: true,
            ..Default::default()
        });
        let host = ServerHost::new(static_source()?, ApolloConfig::default())
            .with_plugins(vec![plugin.into()]);

        let err = host.start().await.unwrap_err();
        assert!(matches!(err, SchemaGateError::Domain(DomainError::Plugin { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_document_is_parsed_once_when_cached() -> Result<()> {
        let store: Arc<dyn DocumentStore> = Arc::new(LruDocumentStore::default());
        let host = ServerHost::new(static_source()?, ApolloConfig::default())
            .with_document_store(Some(store.clone()));
        host.start().await?;
        let parses = AtomicUsize::new(0);

        let first = host.document("{ one }", parse_counting(&parses)).await?;
        let second = host.document("{ one }", parse_counting(&parses)).await?;

        assert_eq!(first, second);
        assert_eq!(parses.load(Ordering::SeqCst), 1);
        assert_eq!(store.total_size(), first.approximate_size());
        host.stop().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_without_store_every_request_parses() -> Result<()> {
        let host = ServerHost::new(static_source()?, ApolloConfig::default())
            .with_document_store(None);
        host.start().await?;
        let parses = AtomicUsize::new(0);

        host.document("{ one }", parse_counting(&parses)).await?;
        host.document("{ one }", parse_counting(&parses)).await?;

        assert_eq!(parses.load(Ordering::SeqCst), 2);
        assert!(host.document_store().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_schema_update_clears_document_store() -> Result<()> {
        let source = Arc::new(PushSource::new(NotificationCapability::Full)?);
        let store: Arc<dyn DocumentStore> = Arc::new(LruDocumentStore::default());
        let host = ServerHost::new(source.clone(), ApolloConfig::default())
            .with_document_store(Some(store.clone()));
        host.start().await?;
        let parses = AtomicUsize::new(0);
        host.document("{ one }", parse_counting(&parses)).await?;

        source.push(S2, 2)?;
        // Draining the hook task guarantees the clear has run.
        host.stop().await?;

        assert_eq!(store.total_size(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_prepare_pairs_schema_executor_and_document() -> Result<()> {
        let mut source = PushSource::new(NotificationCapability::Full)?;
        source.executor = Some(Arc::new(ConstExecutor));
        let host = ServerHost::new(Arc::new(source), ApolloConfig::default());
        host.start().await?;

        let prepared = host
            .prepare("{ one }", |q: &str| Ok(ParsedDocument::new(json!({"source": q}))))
            .await?;
        assert_eq!(prepared.schema().sdl(), S1);

        let result = prepared
            .executor()
            .unwrap()
            .execute(ExecutionRequest {
                document: prepared.document.clone(),
                operation_name: None,
                variables: json!({}),
            })
            .await?;
        assert_eq!(result.data, Some(json!({"ok": true})));
        host.stop().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_parse_errors_propagate() -> Result<()> {
        let host = ServerHost::new(static_source()?, ApolloConfig::default());
        host.start().await?;

        let err = host
            .document("{ broken", |_q: &str| Err(DomainError::Document("Syntax Error".into())))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Document(_)));
        Ok(())
    }
}
