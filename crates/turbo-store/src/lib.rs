//! Synchronous Key-Value stores and store-backed values for TurboCart.
//!
//! The store contract is deliberately small: string keys, string values, a
//! `get` that may find nothing and a `set` that overwrites. [`Persisted`]
//! layers JSON encoding on top and keeps one value mirrored into one key.
//!
//! # Example
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use turbo_store::{MemoryStore, Persisted};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Default)]
//! struct Prefs {
//!     dark_mode: bool,
//! }
//!
//! let store = MemoryStore::new();
//!
//! // Load from the store, or start from the default
//! let mut prefs = Persisted::new_with(&store, "prefs", Prefs::default);
//!
//! // Every change is written back
//! prefs.update(|_| Prefs { dark_mode: true });
//!
//! // A fresh binding sees the written value
//! let reloaded = Persisted::new_with(&store, "prefs", Prefs::default);
//! assert!(reloaded.get().dark_mode);
//! ```

mod error;
mod file;
mod kv;
mod memory;
mod persisted;

pub use error::StoreError;
pub use file::FileStore;
pub use kv::KvStore;
pub use memory::MemoryStore;
pub use persisted::{Persisted, WriteOutcome};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, KvStore, MemoryStore, Persisted, StoreError, WriteOutcome};
}
