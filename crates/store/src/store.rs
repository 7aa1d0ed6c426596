//! The dispatch hub: single owner and only writer of the application state.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use shoppyglobe_core::cart::{Action, AppState, reduce};
use tracing::instrument;

use crate::persistence;
use crate::storage::Storage;

/// Source of the timestamps stamped onto each transition.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc>,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&AppState)>;

/// Holder of the current [`AppState`].
///
/// Consumers receive the store by reference; the only way to change the
/// state is [`Store::dispatch`]. Dispatches run to completion one at a time,
/// and subscribers see every committed state in dispatch order.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use shoppyglobe_core::cart::actions;
/// use shoppyglobe_store::{CART_STORAGE_KEY, MemoryStorage, Storage, Store, SystemClock};
///
/// let storage = Arc::new(MemoryStorage::new());
/// let mut store = Store::with_persistence(storage.clone(), CART_STORAGE_KEY, SystemClock);
///
/// store.dispatch(actions::set_search_term("phone"));
/// assert_eq!(store.state().search(), "phone");
/// assert!(storage.get_item(CART_STORAGE_KEY).unwrap().is_some());
/// ```
pub struct Store {
    state: AppState,
    clock: Box<dyn Clock>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Store {
    /// Create a store with the given initial state and the system clock.
    #[must_use]
    pub fn new(initial: AppState) -> Self {
        Self::with_clock(initial, SystemClock)
    }

    /// Create a store with the given initial state and clock.
    #[must_use]
    pub fn with_clock(initial: AppState, clock: impl Clock + 'static) -> Self {
        Self {
            state: initial,
            clock: Box::new(clock),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Rehydrate from `storage` and keep it updated.
    ///
    /// The cart slice is seeded from [`persistence::load`] (or empty if
    /// nothing usable is stored); the search term always starts empty. A
    /// subscriber saving the cart after every dispatch is registered before
    /// this returns.
    pub fn with_persistence(
        storage: Arc<dyn Storage>,
        key: impl Into<String>,
        clock: impl Clock + 'static,
    ) -> Self {
        let key = key.into();
        let now = clock.now();

        let initial = match persistence::load(storage.as_ref(), &key, now) {
            Some(cart) => {
                tracing::info!(
                    key = %key,
                    items = cart.len(),
                    total = %cart.total(),
                    "Restored cart from storage"
                );
                AppState::with_cart(cart)
            }
            None => AppState::new(now),
        };

        let mut store = Self::with_clock(initial, clock);
        store.subscribe(move |state: &AppState| {
            persistence::save(storage.as_ref(), &key, state.cart());
        });
        store
    }

    /// Apply an action and notify subscribers.
    #[instrument(skip_all, fields(action = action.kind()))]
    pub fn dispatch(&mut self, action: Action) {
        let now = self.clock.now();
        self.state = reduce(&self.state, &action, now);

        tracing::debug!(
            items = self.state.cart().len(),
            total = %self.state.cart().total(),
            "Dispatched action"
        );

        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }

    /// Dispatch an action received as JSON from the UI layer.
    ///
    /// Payloads that are not a known action are ignored. Returns whether an
    /// action was dispatched.
    pub fn dispatch_json(&mut self, raw: &Value) -> bool {
        match serde_json::from_value::<Action>(raw.clone()) {
            Ok(action) => {
                self.dispatch(action);
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unrecognized action");
                false
            }
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> AppState {
        self.state.clone()
    }

    /// Register a callback invoked after every dispatch.
    pub fn subscribe(&mut self, listener: impl FnMut(&AppState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
