//! The synchronous string Key-Value store contract.

use std::rc::Rc;

use crate::StoreError;

/// A synchronous store of string values addressed by string keys.
///
/// This is the only thing the rest of TurboCart knows about persistence: a
/// `get` that may find nothing and a `set` that overwrites. Values are opaque
/// strings; callers decide how to encode them (see [`crate::Persisted`]).
///
/// Methods take `&self` so that several owners can share one store, the way
/// every part of a page shares the browser's storage. Implementations use
/// interior mutability.
pub trait KvStore {
    /// Get the value at `key`, or `None` if nothing is stored there.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` at `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key` from the store. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Check whether `key` holds a value.
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        (**self).exists(key)
    }
}

impl<S: KvStore + ?Sized> KvStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        (**self).exists(key)
    }
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        (**self).exists(key)
    }
}

/// Helper to build store keys with namespacing.
///
/// # Example
///
/// ```rust
/// use turbo_store::store_key;
///
/// let key = store_key!("demo", "Shopping-cart");
/// assert_eq!(key, "demo:Shopping-cart");
/// ```
#[macro_export]
macro_rules! store_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
