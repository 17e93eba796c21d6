// schemagate-core/src/domain/subscription.rs
//
// Listener bookkeeping shared by every notifying schema source.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use crate::domain::error::DomainError;
use crate::domain::schema::{ApiSchema, SchemaContext};

/// Which change notifications a schema source can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationCapability {
    /// Static source: load once, never refreshes.
    None,
    /// Schema-only callbacks (`on_schema_change`).
    Legacy,
    /// Schema plus raw supergraph document (`on_schema_load_or_update`).
    Full,
}

impl NotificationCapability {
    pub fn supports(self, requested: NotificationCapability) -> bool {
        match (self, requested) {
            (_, NotificationCapability::None) => true,
            (NotificationCapability::Full, _) => true,
            (NotificationCapability::Legacy, NotificationCapability::Legacy) => true,
            _ => false,
        }
    }
}

impl fmt::Display for NotificationCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationCapability::None => "none",
            NotificationCapability::Legacy => "legacy",
            NotificationCapability::Full => "full",
        };
        f.write_str(label)
    }
}

pub type SchemaChangeCallback = Box<dyn Fn(Arc<ApiSchema>) + Send + Sync>;
pub type SchemaLoadOrUpdateCallback = Box<dyn Fn(&SchemaContext) + Send + Sync>;

pub enum Listener {
    Legacy(SchemaChangeCallback),
    Full(SchemaLoadOrUpdateCallback),
}

impl Listener {
    pub fn capability(&self) -> NotificationCapability {
        match self {
            Listener::Legacy(_) => NotificationCapability::Legacy,
            Listener::Full(_) => NotificationCapability::Full,
        }
    }

    fn deliver(&self, ctx: &SchemaContext) {
        match self {
            Listener::Legacy(callback) => callback(Arc::clone(&ctx.api_schema)),
            Listener::Full(callback) => callback(ctx),
        }
    }
}

/// Handle returned by a subscription; hand it back to `release` to stop deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

impl SubscriptionToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

struct Slot {
    token: SubscriptionToken,
    active: AtomicBool,
    listener: Listener,
}

/// Ordered listener list with single-flight delivery.
///
/// Invariants:
/// - listeners fire in registration order, one change at a time;
/// - a released listener is never invoked again, even mid-delivery;
/// - nothing is delivered once the registry is closed;
/// - a panicking listener is skipped, the others still fire.
///
/// Callbacks run while the dispatch lock is held: they must not call
/// `notify` or `close` on the same registry.
pub struct ListenerRegistry {
    capability: NotificationCapability,
    next_token: AtomicU64,
    slots: Mutex<Vec<Arc<Slot>>>,
    dispatch: Mutex<()>,
    closed: AtomicBool,
}

impl ListenerRegistry {
    pub fn new(capability: NotificationCapability) -> Self {
        Self {
            capability,
            next_token: AtomicU64::new(1),
            slots: Mutex::new(Vec::new()),
            dispatch: Mutex::new(()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn capability(&self) -> NotificationCapability {
        self.capability
    }

    pub fn register(&self, listener: Listener) -> Result<SubscriptionToken, DomainError> {
        let requested = listener.capability();
        if !self.capability.supports(requested) {
            return Err(DomainError::UnsupportedCapability {
                requested,
                supported: self.capability,
            });
        }

        let token = SubscriptionToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        lock(&self.slots).push(Arc::new(Slot {
            token,
            active: AtomicBool::new(true),
            listener,
        }));
        Ok(token)
    }

    /// Returns `true` only for the call that actually removed the listener.
    pub fn release(&self, token: SubscriptionToken) -> bool {
        let mut slots = lock(&self.slots);
        match slots.iter().position(|slot| slot.token == token) {
            Some(index) => {
                let slot = slots.remove(index);
                slot.active.store(false, Ordering::Release);
                true
            }
            None => false,
        }
    }

    /// Delivers one change to every active listener. Returns how many fired.
    pub fn notify(&self, ctx: &SchemaContext) -> usize {
        if self.is_closed() {
            return 0;
        }

        let _in_flight = lock(&self.dispatch);
        let snapshot: Vec<Arc<Slot>> = lock(&self.slots).clone();

        let mut delivered = 0;
        for slot in snapshot {
            if self.is_closed() {
                break;
            }
            if !slot.active.load(Ordering::Acquire) {
                continue;
            }
            match panic::catch_unwind(AssertUnwindSafe(|| slot.listener.deliver(ctx))) {
                Ok(()) => delivered += 1,
                Err(_) => warn!(
                    token = slot.token.id(),
                    generation = ctx.api_schema.generation(),
                    "Schema listener panicked, skipping it for this change"
                ),
            }
        }
        delivered
    }

    /// Stops all future deliveries and waits for an in-flight one to finish.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        drop(lock(&self.dispatch));
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        lock(&self.slots).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Poisoning is ignored: the guarded data has no cross-field invariant.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
