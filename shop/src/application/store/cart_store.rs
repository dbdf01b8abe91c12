/// Shared cart store: one cart, many views
use crate::domain::{
    aggregates::{self, Cart},
    base::{DomainEvent, Entity},
    entities::{LineItem, Product},
    events::CartEvent,
    value_objects::{CartId, ProductId},
};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};
use tracing::debug;

/// Callback invoked after every state-changing mutation
pub type CartListener = Arc<dyn Fn(&CartEvent, &CartSnapshot) + Send + Sync>;

/// Immutable copy of the cart taken right after a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    cart_id: CartId,
    version: u64,
    lines: Vec<LineItem>,
}

impl CartSnapshot {
    fn capture(state: &StoreState) -> Self {
        CartSnapshot {
            cart_id: *state.cart.id(),
            version: state.version,
            lines: state.cart.lines().to_vec(),
        }
    }

    pub fn cart_id(&self) -> CartId {
        self.cart_id
    }

    /// Number of state-changing mutations applied before this snapshot.
    /// Listeners on different threads may receive snapshots out of order;
    /// a higher version is always the newer state.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.product_id() == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_count(&self) -> u64 {
        aggregates::total_count(&self.lines)
    }

    pub fn total_price(&self) -> f64 {
        aggregates::total_price(&self.lines)
    }
}

struct StoreState {
    cart: Cart,
    version: u64,
}

struct StoreInner {
    state: RwLock<StoreState>,
    listeners: RwLock<Vec<(u64, CartListener)>>,
    next_listener_id: Mutex<u64>,
}

/// Per-`select` delivery state
struct Selection<T> {
    seen: u64,
    last: T,
    pending: Option<CartSnapshot>,
    delivering: bool,
}

/// Handle to a shared cart.
///
/// Cloning the handle does not copy the cart: every clone reads and mutates the
/// same state, and every subscriber sees mutations made through any clone.
/// Listeners run synchronously on the mutating thread after the store's locks
/// are released, so a listener may read or mutate the store itself.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<StoreInner>,
}

impl CartStore {
    /// Create a store around a new empty cart
    pub fn new() -> Self {
        Self::with_cart(Cart::new())
    }

    pub fn with_cart(cart: Cart) -> Self {
        CartStore {
            inner: Arc::new(StoreInner {
                state: RwLock::new(StoreState { cart, version: 0 }),
                listeners: RwLock::new(Vec::new()),
                next_listener_id: Mutex::new(0),
            }),
        }
    }

    /// Whether two handles point at the same store
    pub fn same_store(a: &CartStore, b: &CartStore) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    pub fn cart_id(&self) -> CartId {
        self.read(|cart| *cart.id())
    }

    /// Handle that does not keep the store alive
    pub fn downgrade(&self) -> WeakCartStore {
        WeakCartStore {
            inner: Arc::downgrade(&self.inner),
        }
    }

    // Mutations

    /// Add one unit of a product; increments an existing line
    pub fn add_item(&self, product: &Product) {
        self.mutate(|cart| cart.add_item(product));
    }

    /// Remove the line for a product; no-op when absent
    pub fn remove_item(&self, product_id: ProductId) {
        self.mutate(|cart| cart.remove_item(&product_id));
    }

    /// Set a line's quantity; zero or negative removes it, an absent line stays absent
    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) {
        self.mutate(|cart| cart.update_quantity(&product_id, quantity));
    }

    /// Empty the cart
    pub fn clear(&self) {
        self.mutate(|cart| cart.clear());
    }

    // Queries

    pub fn total_count(&self) -> u64 {
        self.read(|cart| cart.total_count())
    }

    pub fn total_price(&self) -> f64 {
        self.read(|cart| cart.total_price())
    }

    pub fn items(&self) -> Vec<LineItem> {
        self.read(|cart| cart.lines().to_vec())
    }

    pub fn line(&self, product_id: ProductId) -> Option<LineItem> {
        self.read(|cart| cart.line(&product_id).cloned())
    }

    pub fn is_empty(&self) -> bool {
        self.read(|cart| cart.is_empty())
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::capture(&self.inner.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    // Subscriptions

    /// Register a listener for every state-changing mutation
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&CartEvent, &CartSnapshot) + Send + Sync + 'static,
    {
        let id = {
            let mut next = self
                .inner
                .next_listener_id
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            *next += 1;
            *next
        };

        self.inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));

        Subscription {
            store: Arc::downgrade(&self.inner),
            id,
            active: true,
        }
    }

    /// Subscribe to one derived slice of the cart.
    ///
    /// `selector` is evaluated now to seed the previous value and again after
    /// each mutation; `on_change` fires only when the selected value differs.
    /// Deliveries are serialized in version order: a snapshot older than one
    /// already seen is dropped, so the last value delivered always matches the
    /// newest state even when several threads mutate at once.
    pub fn select<T, S, F>(&self, selector: S, on_change: F) -> Subscription
    where
        T: PartialEq + Clone + Send + 'static,
        S: Fn(&CartSnapshot) -> T + Send + Sync + 'static,
        F: Fn(&T) + Send + Sync + 'static,
    {
        let initial = self.snapshot();
        let selection = Mutex::new(Selection {
            seen: initial.version(),
            last: selector(&initial),
            pending: None,
            delivering: false,
        });

        self.subscribe(move |_event, snapshot| {
            {
                let mut state = selection.lock().unwrap_or_else(PoisonError::into_inner);
                if snapshot.version() <= state.seen {
                    return;
                }
                state.seen = snapshot.version();
                state.pending = Some(snapshot.clone());
                // whoever is delivering picks the newest snapshot up
                if state.delivering {
                    return;
                }
                state.delivering = true;
            }

            loop {
                let next = {
                    let mut state = selection.lock().unwrap_or_else(PoisonError::into_inner);
                    let Some(pending) = state.pending.take() else {
                        state.delivering = false;
                        return;
                    };
                    let next = selector(&pending);
                    if next == state.last {
                        continue;
                    }
                    state.last = next.clone();
                    next
                };
                on_change(&next);
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn read<T>(&self, f: impl FnOnce(&Cart) -> T) -> T {
        let state = self.inner.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state.cart)
    }

    fn mutate(&self, command: impl FnOnce(&mut Cart) -> Option<CartEvent>) {
        let (event, snapshot) = {
            let mut state = self.inner.state.write().unwrap_or_else(PoisonError::into_inner);
            match command(&mut state.cart) {
                Some(event) => {
                    state.version += 1;
                    (event, CartSnapshot::capture(&state))
                }
                None => return,
            }
        };

        debug!(
            event = event.event_type(),
            version = snapshot.version(),
            product_id = event.product_id().map(|id| id.value()),
            total_count = snapshot.total_count(),
            "cart updated"
        );

        let listeners: Vec<CartListener> = self
            .inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(&event, &snapshot);
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        CartStore::new()
    }
}

/// Non-owning counterpart of `CartStore`, for listeners that outlive their subscription
#[derive(Clone)]
pub struct WeakCartStore {
    inner: Weak<StoreInner>,
}

impl WeakCartStore {
    pub fn upgrade(&self) -> Option<CartStore> {
        self.inner.upgrade().map(|inner| CartStore { inner })
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart_id", &self.cart_id())
            .field("lines", &self.items().len())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Listener registration. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    store: Weak<StoreInner>,
    id: u64,
    active: bool,
}

impl Subscription {
    /// Remove the listener now
    pub fn unsubscribe(mut self) {
        self.remove();
    }

    /// Keep the listener for as long as the store lives.
    ///
    /// A detached listener that owns a `CartStore` clone keeps that store
    /// alive forever; capture `CartStore::downgrade` instead.
    pub fn detach(mut self) {
        self.active = false;
    }

    fn remove(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(store) = self.store.upgrade() {
            store
                .listeners
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}
