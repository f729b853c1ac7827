//! Core trait for asynchronous key-value storage
//!
//! The in-memory store, the batch fetch helper and the memoizer all speak to
//! storage through this trait, so a slower backing store can be dropped in
//! without touching the callers.

use std::future::Future;

use crate::types::StoreError;

/// Trait for an asynchronous key-value map
///
/// Every operation is a suspension point. Keys are unique: setting an existing
/// key overwrites its value.
pub trait AsyncStore<K, V> {
    /// Get the value stored under `key`
    ///
    /// Fails with [`StoreError::MissingKey`] if the key is absent.
    fn get(&self, key: &K) -> impl Future<Output = Result<V, StoreError>> + Send;

    /// Insert or overwrite the entry for `key`
    fn set(&self, key: K, value: V) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Remove the entry for `key`
    ///
    /// Fails with [`StoreError::MissingKey`] if the key was not present.
    fn delete(&self, key: &K) -> impl Future<Output = Result<(), StoreError>> + Send;
}
