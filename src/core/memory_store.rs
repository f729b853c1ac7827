//! In-memory asynchronous key-value store
//!
//! This module provides the `MemoryStore` struct, the default implementation of
//! [`AsyncStore`]. Entries live in a `DashMap` owned by the store, so the store
//! can be shared by reference between concurrently polled futures (or across
//! threads behind an `Arc`) without any module-level state.
//!
//! # Completion
//!
//! The lookup or mutation itself happens synchronously when the operation is
//! first polled. The operation then yields once to the scheduler, so its result
//! is always delivered on a later poll. Callers therefore see the same
//! suspension behaviour they would see from a slower backing store.
//!
//! # Atomicity
//!
//! Each single-key operation is atomic with respect to the others. Sequences of
//! operations (such as the memoizer's get-compute-set) are not.

use std::hash::Hash;

use dashmap::DashMap;
use tracing::trace;

use super::traits::AsyncStore;
use crate::types::StoreError;

/// In-memory key-value store with an asynchronous interface
///
/// `MemoryStore` owns its mapping exclusively. It is created empty and dropped
/// like any other value; there is no explicit teardown.
#[derive(Debug)]
pub struct MemoryStore<K, V>
where
    K: Eq + Hash,
{
    /// Entries keyed by value equality of `K`
    entries: DashMap<K, V>,
}

impl<K, V> MemoryStore<K, V>
where
    K: Eq + Hash,
{
    /// Create a new empty MemoryStore
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of entries currently stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check for a key without going through the asynchronous interface
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }
}

impl<K, V> Default for MemoryStore<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Create a new empty store
pub fn create_store<K, V>() -> MemoryStore<K, V>
where
    K: Eq + Hash,
{
    MemoryStore::new()
}

impl<K, V> AsyncStore<K, V> for MemoryStore<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    async fn get(&self, key: &K) -> Result<V, StoreError> {
        // Clone out so the shard guard is released before yielding
        let value = self.entries.get(key).map(|entry| entry.value().clone());
        trace!(hit = value.is_some(), "store get");

        tokio::task::yield_now().await;
        value.ok_or(StoreError::MissingKey)
    }

    async fn set(&self, key: K, value: V) -> Result<(), StoreError> {
        let replaced = self.entries.insert(key, value).is_some();
        trace!(replaced, "store set");

        tokio::task::yield_now().await;
        Ok(())
    }

    async fn delete(&self, key: &K) -> Result<(), StoreError> {
        let removed = self.entries.remove(key).is_some();
        trace!(removed, "store delete");

        tokio::task::yield_now().await;
        if removed {
            Ok(())
        } else {
            Err(StoreError::MissingKey)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn test_get_missing_key() {
        let store: MemoryStore<&str, i32> = MemoryStore::new();
        assert_eq!(store.get(&"absent").await, Err(StoreError::MissingKey));
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("a", 1).await.unwrap();

        assert_eq!(store.get(&"a").await, Ok(1));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_key() {
        let store = MemoryStore::new();
        store.set("a", 1).await.unwrap();
        store.set("a", 2).await.unwrap();

        assert_eq!(store.get(&"a").await, Ok(2));
        // Overwrite never duplicates
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_present_key() {
        let store = MemoryStore::new();
        store.set("a", 1).await.unwrap();

        assert_eq!(store.delete(&"a").await, Ok(()));
        assert_eq!(store.get(&"a").await, Err(StoreError::MissingKey));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_key() {
        let store: MemoryStore<&str, i32> = MemoryStore::new();
        assert_eq!(store.delete(&"absent").await, Err(StoreError::MissingKey));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = MemoryStore::new();
        store.set(7u32, "seven").await.unwrap();

        assert_eq!(store.delete(&7).await, Ok(()));
        assert_eq!(store.delete(&7).await, Err(StoreError::MissingKey));
    }

    #[rstest]
    #[case::string_keys(vec!["x".to_string(), "y".to_string()])]
    #[case::single_key(vec!["only".to_string()])]
    #[tokio::test]
    async fn test_keys_compared_by_value(#[case] keys: Vec<String>) {
        let store = create_store();
        for (i, key) in keys.iter().enumerate() {
            store.set(key.clone(), i).await.unwrap();
        }

        // A freshly built, equal key finds the same entry
        for (i, key) in keys.iter().enumerate() {
            let lookup = key.as_str().to_owned();
            assert_eq!(store.get(&lookup).await, Ok(i));
            assert!(store.contains_key(&lookup));
        }
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Get,
        Set,
        Delete,
    }

    #[rstest]
    #[case::get_present(Op::Get, true, Ok(()), true)]
    #[case::get_absent(Op::Get, false, Err(StoreError::MissingKey), false)]
    #[case::set_present(Op::Set, true, Ok(()), true)]
    #[case::set_absent(Op::Set, false, Ok(()), true)]
    #[case::delete_present(Op::Delete, true, Ok(()), false)]
    #[case::delete_absent(Op::Delete, false, Err(StoreError::MissingKey), false)]
    fn test_operation_completes_on_later_poll(
        #[case] op: Op,
        #[case] present: bool,
        #[case] expected: Result<(), StoreError>,
        #[case] present_after: bool,
    ) {
        use futures::future::BoxFuture;
        use futures::FutureExt;

        let store = MemoryStore::new();
        if present {
            store.entries.insert(1, 10);
        }

        let mut pending: BoxFuture<'_, Result<(), StoreError>> = match op {
            Op::Get => store.get(&1).map(|result| result.map(|_| ())).boxed(),
            Op::Set => store.set(1, 20).boxed(),
            Op::Delete => store.delete(&1).boxed(),
        };

        assert!(pending.as_mut().now_or_never().is_none());
        // The work itself is applied on the first poll
        assert_eq!(store.contains_key(&1), present_after);
        assert_eq!(pending.now_or_never(), Some(expected));
    }

    #[test]
    fn test_concurrent_access_from_threads() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemoryStore::new());
        for i in 0u32..10 {
            store.entries.insert(i, i * 100);
        }

        let mut handles = vec![];
        for i in 0u32..10 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                let value = futures::executor::block_on(store.get(&i)).unwrap();
                assert_eq!(value, i * 100);
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
