//! The cart state container.

use turbo_store::{KvStore, Persisted, WriteOutcome};

use crate::events::{CartEvent, Listeners, SubscriptionId};
use crate::{ops, LineItem, ProductId};

/// Store key the cart's line items are persisted under.
pub const CART_STORAGE_KEY: &str = "Shopping-cart";

/// Shopping cart state: persisted line items plus a transient panel flag.
///
/// The line items live in a [`Persisted`] slot, so they are loaded when the
/// cart is built and written back after every change. Whether the cart panel
/// is open is held in memory only and always starts closed.
///
/// Build one cart per application and pass it by reference to whatever needs
/// it. Parts of the application that need to react to changes register a
/// listener with [`subscribe`](Self::subscribe).
///
/// Mutations never fail. They return the [`WriteOutcome`] of the underlying
/// store write so callers can surface a persistence warning if they want to.
///
/// # Example
///
/// ```rust
/// use turbo_cart::ShoppingCart;
/// use turbo_store::MemoryStore;
///
/// let store = MemoryStore::new();
/// let mut cart = ShoppingCart::new(&store);
///
/// cart.increase_cart_quantity(5);
/// cart.increase_cart_quantity(5);
/// cart.decrease_cart_quantity(5);
///
/// assert_eq!(cart.get_item_quantity(5), 1);
/// assert_eq!(cart.cart_quantity(), 1);
///
/// // A reload sees the same items.
/// let reloaded = ShoppingCart::new(&store);
/// assert_eq!(reloaded.items(), cart.items());
/// assert!(!reloaded.is_open());
/// ```
#[derive(Debug)]
pub struct ShoppingCart<S> {
    items: Persisted<Vec<LineItem>, S>,
    is_open: bool,
    listeners: Listeners,
}

impl<S: KvStore> ShoppingCart<S> {
    /// Load the cart from `store` under [`CART_STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, CART_STORAGE_KEY)
    }

    /// Load the cart from `store` under a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        let mut items = Persisted::new_with(store, key, Vec::new);
        if items.update(|loaded| ops::normalize(loaded)).changed() {
            tracing::warn!(key = %items.key(), "repaired inconsistent persisted cart");
        }

        tracing::debug!(
            key = %items.key(),
            line_items = items.get().len(),
            "cart loaded"
        );

        Self {
            items,
            is_open: false,
            listeners: Listeners::default(),
        }
    }

    /// Current line items, in the order they were first added.
    pub fn items(&self) -> &[LineItem] {
        self.items.get()
    }

    /// Quantity of `id` in the cart, or 0.
    pub fn get_item_quantity(&self, id: impl Into<ProductId>) -> i64 {
        ops::quantity_of(self.items(), id.into())
    }

    /// Total number of units across all line items.
    pub fn cart_quantity(&self) -> i64 {
        ops::total_quantity(self.items())
    }

    /// Number of distinct products in the cart.
    pub fn unique_item_count(&self) -> usize {
        self.items().len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Whether the cart panel is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Store key the items are persisted under.
    pub fn storage_key(&self) -> &str {
        self.items.key()
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        self.items.store()
    }

    /// Add one unit of `id`.
    pub fn increase_cart_quantity(&mut self, id: impl Into<ProductId>) -> WriteOutcome {
        let id = id.into();
        self.apply("increase", id, |items| ops::increase(items, id))
    }

    /// Remove one unit of `id`. Removes the line item when its last unit goes.
    ///
    /// Does nothing if `id` is not in the cart.
    pub fn decrease_cart_quantity(&mut self, id: impl Into<ProductId>) -> WriteOutcome {
        let id = id.into();
        self.apply("decrease", id, |items| ops::decrease(items, id))
    }

    /// Remove the line item for `id`, whatever its quantity.
    pub fn remove_from_cart(&mut self, id: impl Into<ProductId>) -> WriteOutcome {
        let id = id.into();
        self.apply("remove", id, |items| ops::remove(items, id))
    }

    /// Remove every line item.
    pub fn clear_cart(&mut self) -> WriteOutcome {
        let outcome = self.items.set(Vec::new());
        tracing::debug!(changed = outcome.changed(), "cart cleared");
        self.publish(&outcome);
        outcome
    }

    /// Open the cart panel.
    pub fn open_cart(&mut self) {
        if !self.is_open {
            self.is_open = true;
            self.listeners.notify(&CartEvent::Opened);
        }
    }

    /// Close the cart panel.
    pub fn close_cart(&mut self) {
        if self.is_open {
            self.is_open = false;
            self.listeners.notify(&CartEvent::Closed);
        }
    }

    /// Register a listener for cart changes.
    ///
    /// Listeners only hear about actual changes: a mutation that leaves the
    /// items as they were, or opening an already open panel, is silent.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CartEvent<'_>) + 'static,
    {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn apply<F>(&mut self, op: &'static str, id: ProductId, f: F) -> WriteOutcome
    where
        F: FnOnce(&[LineItem]) -> Vec<LineItem>,
    {
        let outcome = self.items.update(|items| f(items));
        tracing::debug!(
            op,
            product_id = %id,
            quantity = self.get_item_quantity(id),
            changed = outcome.changed(),
            "cart updated"
        );
        self.publish(&outcome);
        outcome
    }

    fn publish(&mut self, outcome: &WriteOutcome) {
        if outcome.changed() {
            let items = self.items.get();
            self.listeners.notify(&CartEvent::ItemsChanged {
                items,
                cart_quantity: ops::total_quantity(items),
            });
        }
        if let Some(error) = outcome.error() {
            self.listeners.notify(&CartEvent::PersistFailed {
                key: self.items.key(),
                error,
            });
        }
    }
}
