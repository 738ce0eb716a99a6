//! Persisted shopping-cart state for TurboCart.
//!
//! This crate provides the cart an application builds once and hands to
//! whatever needs it:
//!
//! - **LineItem**: a product id and a positive quantity
//! - **ShoppingCart**: line items persisted in a Key-Value store, plus the
//!   transient open/closed state of the cart panel
//! - **ops**: the pure snapshot-in, snapshot-out mutations the cart is built on
//! - **CartEvent**: change notifications for subscribers
//!
//! # Example
//!
//! ```rust
//! use turbo_cart::prelude::*;
//! use turbo_store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let mut cart = ShoppingCart::new(&store);
//!
//! cart.subscribe(|event| {
//!     if let CartEvent::ItemsChanged { cart_quantity, .. } = event {
//!         println!("{} item(s) in cart", cart_quantity);
//!     }
//! });
//!
//! cart.increase_cart_quantity(5);
//! cart.open_cart();
//! ```

mod cart;
mod events;
mod ids;
mod item;

pub mod ops;

pub use cart::{ShoppingCart, CART_STORAGE_KEY};
pub use events::{CartEvent, SubscriptionId};
pub use ids::ProductId;
pub use item::LineItem;

pub use turbo_store::WriteOutcome;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CartEvent, LineItem, ProductId, ShoppingCart, SubscriptionId, WriteOutcome,
        CART_STORAGE_KEY,
    };
}
