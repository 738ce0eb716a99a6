//! A value mirrored into one key of a [`KvStore`].

use serde::{de::DeserializeOwned, Serialize};

use crate::{KvStore, StoreError};

/// What happened to the store when a [`Persisted`] value was written.
#[derive(Debug)]
pub enum WriteOutcome {
    /// The new value equals the held one; nothing was written.
    Unchanged,
    /// The value changed and the store now holds it.
    Persisted,
    /// The value changed in memory but the store write failed.
    ///
    /// The in-memory value is still the new one. The next successful write
    /// brings the store back in line.
    Failed(StoreError),
}

impl WriteOutcome {
    /// Whether the held value changed.
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    /// The write error, if the store rejected the value.
    pub fn error(&self) -> Option<&StoreError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// A value bound to a named slot in a Key-Value store.
///
/// On construction the slot is read and parsed as JSON. A missing slot, an
/// unreadable store, or an unparsable value all fall back to the caller's
/// default. The resulting value is then written back immediately, which also
/// overwrites a corrupted slot.
///
/// Every later change made through [`set`](Self::set) or
/// [`update`](Self::update) is serialized and written before the call
/// returns. Store failures never panic or propagate: they are logged and
/// reported as [`WriteOutcome::Failed`], and the in-memory value is kept.
///
/// # Example
///
/// ```rust
/// use turbo_store::{KvStore, MemoryStore, Persisted};
///
/// let store = MemoryStore::new();
/// let mut visits = Persisted::new(&store, "visits", 0u32);
/// visits.update(|n| n + 1);
///
/// assert_eq!(*visits.get(), 1);
/// assert_eq!(store.get("visits").unwrap().as_deref(), Some("1"));
/// ```
#[derive(Debug)]
pub struct Persisted<T, S> {
    store: S,
    key: String,
    value: T,
}

impl<T, S> Persisted<T, S>
where
    T: Serialize + DeserializeOwned + PartialEq,
    S: KvStore,
{
    /// Bind `key` in `store`, starting from `initial` when nothing usable is stored.
    pub fn new(store: S, key: impl Into<String>, initial: T) -> Self {
        Self::new_with(store, key, move || initial)
    }

    /// Bind `key` in `store`, calling `initial` only when nothing usable is stored.
    pub fn new_with<F>(store: S, key: impl Into<String>, initial: F) -> Self
    where
        F: FnOnce() -> T,
    {
        let key = key.into();
        let value = match load(&store, &key) {
            Ok(Some(value)) => {
                tracing::debug!(key = %key, "loaded persisted value");
                value
            }
            Ok(None) => initial(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "discarding unusable persisted value");
                initial()
            }
        };

        let cell = Self { store, key, value };
        // Failures are already logged; the cell keeps working in memory.
        let _ = cell.persist();
        cell
    }

    /// The current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// The store key this value is bound to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the value. Writes through only if it differs from the held one.
    pub fn set(&mut self, value: T) -> WriteOutcome {
        if value == self.value {
            return WriteOutcome::Unchanged;
        }
        self.value = value;
        self.persist()
    }

    /// Compute a new value from the current one and [`set`](Self::set) it.
    pub fn update<F>(&mut self, f: F) -> WriteOutcome
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.value);
        self.set(next)
    }

    /// Write the held value to the store unconditionally.
    pub fn persist(&self) -> WriteOutcome {
        match write(&self.store, &self.key, &self.value) {
            Ok(()) => {
                tracing::debug!(key = %self.key, "persisted value");
                WriteOutcome::Persisted
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to persist value, keeping it in memory");
                WriteOutcome::Failed(e)
            }
        }
    }

    /// Consume the binding and return the value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

fn load<T: DeserializeOwned, S: KvStore>(store: &S, key: &str) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

fn write<T: Serialize, S: KvStore>(store: &S, key: &str, value: &T) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use std::cell::Cell;

    #[test]
    fn test_missing_key_uses_initial_and_writes_it() {
        let store = MemoryStore::new();
        let cell = Persisted::new(&store, "list", vec![1, 2]);

        assert_eq!(cell.get(), &vec![1, 2]);
        assert_eq!(store.get("list").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_existing_key_wins_over_initial() {
        let store = MemoryStore::from_entries([("list", "[7]")]);
        let cell = Persisted::new(&store, "list", vec![1, 2]);
        assert_eq!(cell.get(), &vec![7]);
    }

    #[test]
    fn test_producer_only_called_when_needed() {
        let calls = Cell::new(0);
        let store = MemoryStore::from_entries([("n", "5")]);

        let cell = Persisted::new_with(&store, "n", || {
            calls.set(calls.get() + 1);
            0
        });
        assert_eq!(*cell.get(), 5);
        assert_eq!(calls.get(), 0);

        let cell = Persisted::new_with(&store, "other", || {
            calls.set(calls.get() + 1);
            9
        });
        assert_eq!(*cell.get(), 9);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_corrupt_value_is_replaced() {
        let store = MemoryStore::from_entries([("list", "{not json")]);
        let cell: Persisted<Vec<i32>, _> = Persisted::new(&store, "list", Vec::new());

        assert!(cell.get().is_empty());
        assert_eq!(store.get("list").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_wrong_shape_is_replaced() {
        let store = MemoryStore::from_entries([("n", r#""text""#)]);
        let cell = Persisted::new(&store, "n", 3u8);

        assert_eq!(*cell.get(), 3);
        assert_eq!(store.get("n").unwrap().as_deref(), Some("3"));
    }

    #[test]
    fn test_set_writes_through() {
        let store = MemoryStore::new();
        let mut cell = Persisted::new(&store, "n", 1);

        assert!(matches!(cell.set(2), WriteOutcome::Persisted));
        assert_eq!(store.get("n").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_equal_value_is_not_rewritten() {
        let store = MemoryStore::new();
        let mut cell = Persisted::new(&store, "n", 1);
        store.set("n", "tampered").unwrap();

        assert!(matches!(cell.set(1), WriteOutcome::Unchanged));
        assert_eq!(store.get("n").unwrap().as_deref(), Some("tampered"));
    }

    #[test]
    fn test_update_sees_latest_value() {
        let store = MemoryStore::new();
        let mut cell = Persisted::new(&store, "n", 0);
        cell.update(|n| n + 1);
        cell.update(|n| n + 1);
        cell.update(|n| n * 10);
        assert_eq!(*cell.get(), 20);
        assert_eq!(store.get("n").unwrap().as_deref(), Some("20"));
    }

    #[test]
    fn test_failed_write_keeps_memory_value() {
        let store = MemoryStore::with_quota(8);
        let mut cell = Persisted::new(&store, "s", String::new());

        let outcome = cell.set("far too long for the quota".to_string());
        assert!(outcome.changed());
        assert!(matches!(outcome.error(), Some(StoreError::QuotaExceeded { .. })));
        assert_eq!(cell.get(), "far too long for the quota");
        assert_eq!(store.get("s").unwrap().as_deref(), Some(r#""""#));
    }

    #[test]
    fn test_into_inner() {
        let store = MemoryStore::new();
        let cell = Persisted::new(store, "k", vec!["a".to_string()]);
        assert_eq!(cell.key(), "k");
        assert_eq!(cell.into_inner(), vec!["a".to_string()]);
    }
}
