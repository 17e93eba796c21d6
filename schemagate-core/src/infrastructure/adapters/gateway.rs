// schemagate-core/src/infrastructure/adapters/gateway.rs
//
// Refreshing schema source: fetches a composed supergraph, optionally polls
// for new compositions, and pushes every actual change to its listeners.

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::config::ApolloConfig;
use crate::domain::error::DomainError;
use crate::domain::schema::{ApiSchema, SchemaContext, ServiceConfig};
use crate::domain::subscription::{
    Listener, ListenerRegistry, NotificationCapability, SubscriptionToken,
};
use crate::ports::executor::Executor;
use crate::ports::fetcher::SupergraphFetcher;
use crate::ports::schema_source::{SchemaNotifier, SchemaSource};

pub struct GatewaySchemaSource<F> {
    state: Arc<GatewayState<F>>,
    poll_interval: Option<Duration>,
    executor: Option<Arc<dyn Executor>>,
    poller: Mutex<Option<Poller>>,
    stopped: OnceCell<Result<(), DomainError>>,
}

struct Poller {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

struct GatewayState<F> {
    fetcher: F,
    apollo: ArcSwapOption<ApolloConfig>,
    current: ArcSwapOption<SchemaContext>,
    registry: ListenerRegistry,
    generation: AtomicU64,
    // Fetch + publish run one at a time so changes are numbered and
    // delivered in the order they were observed.
    refresh_lock: Mutex<()>,
}

impl<F: SupergraphFetcher + 'static> GatewaySchemaSource<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            state: Arc::new(GatewayState {
                fetcher,
                apollo: ArcSwapOption::empty(),
                current: ArcSwapOption::empty(),
                registry: ListenerRegistry::new(NotificationCapability::Full),
                generation: AtomicU64::new(0),
                refresh_lock: Mutex::new(()),
            }),
            poll_interval: None,
            executor: None,
            poller: Mutex::new(None),
            stopped: OnceCell::new(),
        }
    }

    /// Re-fetch in the background every `interval` once loaded.
    pub fn with_poll_interval(mut self, interval: Option<Duration>) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Executor handed out by `load` alongside the schema.
    pub fn with_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Last successfully fetched schema, if any.
    pub fn current(&self) -> Option<Arc<SchemaContext>> {
        self.state.current.load_full()
    }

    /// Fetches now. `Ok(true)` when a new schema was published.
    ///
    /// Unlike background polling, the failure is returned to the caller.
    /// The last known schema stays in effect either way.
    pub async fn refresh(&self) -> Result<bool, DomainError> {
        self.state.refresh().await
    }

    async fn start_polling(&self) {
        let Some(interval) = self.poll_interval else {
            return;
        };

        let mut poller = self.poller.lock().await;
        if poller.is_some() || self.state.registry.is_closed() {
            return;
        }

        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(poll_loop(Arc::clone(&self.state), interval, shutdown_rx));
        *poller = Some(Poller { shutdown, handle });
        info!(?interval, "Supergraph polling started");
    }
}

impl<F: SupergraphFetcher + 'static> GatewayState<F> {
    async fn refresh(&self) -> Result<bool, DomainError> {
        let _serial = self.refresh_lock.lock().await;
        if self.registry.is_closed() {
            return Ok(false);
        }

        let apollo = self
            .apollo
            .load_full()
            .ok_or_else(|| DomainError::NotStarted("gateway schema source".to_string()))?;
        let sdl = self.fetcher.fetch(&apollo).await?;

        // `stop` may have begun while we were fetching.
        if self.registry.is_closed() {
            return Ok(false);
        }

        if let Some(current) = self.current.load_full()
            && *current.core_supergraph_sdl == *sdl
        {
            debug!(
                generation = current.api_schema.generation(),
                "Supergraph unchanged"
            );
            return Ok(false);
        }

        let ctx = self.publish(sdl)?;
        info!(
            generation = ctx.api_schema.generation(),
            "Supergraph updated"
        );
        Ok(true)
    }

    // Caller holds `refresh_lock`.
    fn publish(&self, sdl: String) -> Result<Arc<SchemaContext>, DomainError> {
        let generation = self.generation.load(Ordering::Acquire) + 1;
        let api_schema = Arc::new(ApiSchema::from_sdl(sdl.as_str(), generation)?);
        self.generation.store(generation, Ordering::Release);

        let ctx = Arc::new(SchemaContext {
            api_schema,
            core_supergraph_sdl: Arc::from(sdl),
        });
        self.current.store(Some(Arc::clone(&ctx)));

        let delivered = self.registry.notify(&ctx);
        debug!(generation, delivered, "Schema listeners notified");
        Ok(ctx)
    }
}

async fn poll_loop<F: SupergraphFetcher + 'static>(
    state: Arc<GatewayState<F>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; `load` just fetched.
    ticker.tick().await;

    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                // A fetch in flight is dropped on shutdown, not awaited.
                tokio::select! {
                    refreshed = state.refresh() => {
                        if let Err(e) = refreshed {
                            // Nobody awaits a background refresh: log and keep serving.
                            warn!(
                                source = %state.fetcher.describe(),
                                error = %e,
                                "Supergraph refresh failed, keeping last known schema"
                            );
                        }
                    }
                    _ = shutdown.changed() => break,
                }
            }
        }
    }
    debug!("Supergraph polling stopped");
}

#[async_trait]
impl<F: SupergraphFetcher + 'static> SchemaSource for GatewaySchemaSource<F> {
    #[instrument(skip(self, apollo), fields(source = %self.state.fetcher.describe()))]
    async fn load(&self, apollo: &ApolloConfig) -> Result<ServiceConfig, DomainError> {
        if self.stopped.initialized() {
            return Err(DomainError::AlreadyStopped(
                "gateway schema source".to_string(),
            ));
        }
        self.state.apollo.store(Some(Arc::new(apollo.clone())));

        let ctx = {
            let _serial = self.state.refresh_lock.lock().await;
            let sdl = self.state.fetcher.fetch(apollo).await.map_err(|e| {
                error!("❌ Initial supergraph fetch failed: {}", e);
                DomainError::SchemaLoad(e.to_string())
            })?;

            match self.state.current.load_full() {
                Some(current) if *current.core_supergraph_sdl == *sdl => current,
                _ => self
                    .state
                    .publish(sdl)
                    .map_err(|e| DomainError::SchemaLoad(e.to_string()))?,
            }
        };
        info!(
            generation = ctx.api_schema.generation(),
            "✅ Supergraph loaded"
        );

        self.start_polling().await;

        Ok(ServiceConfig {
            schema: Arc::clone(&ctx.api_schema),
            executor: self.executor.clone(),
        })
    }

    fn notifier(&self) -> Option<&dyn SchemaNotifier> {
        Some(self)
    }

    async fn stop(&self) -> Result<(), DomainError> {
        self.stopped
            .get_or_init(|| async {
                // Close first: no delivery may start once stopping has begun.
                self.state.registry.close();

                let poller = self.poller.lock().await.take();
                let outcome = match poller {
                    Some(Poller { shutdown, handle }) => {
                        let _ = shutdown.send(true);
                        match handle.await {
                            Ok(()) => Ok(()),
                            Err(e) if e.is_cancelled() => Ok(()),
                            Err(e) => Err(DomainError::StopFailed(format!(
                                "poll task ended abnormally: {}",
                                e
                            ))),
                        }
                    }
                    None => Ok(()),
                };

                match &outcome {
                    Ok(()) => info!("Gateway schema source stopped"),
                    Err(e) => error!("❌ Gateway schema source stop failed: {}", e),
                }
                outcome
            })
            .await
            .clone()
    }

    fn name(&self) -> &str {
        "gateway"
    }
}

impl<F: SupergraphFetcher + 'static> SchemaNotifier for GatewaySchemaSource<F> {
    fn capability(&self) -> NotificationCapability {
        self.state.registry.capability()
    }

    fn subscribe(&self, listener: Listener) -> Result<SubscriptionToken, DomainError> {
        self.state.registry.register(listener)
    }

    fn release(&self, token: SubscriptionToken) -> bool {
        self.state.registry.release(token)
    }
}
