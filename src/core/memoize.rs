//! Asynchronous memoization backed by an [`AsyncStore`]
//!
//! [`memoize`] wraps a pure function with a dedicated cache. The first call for
//! an input computes the result and stores it; later calls for an equal input
//! read it back from the cache without invoking the function.
//!
//! # Concurrent Calls
//!
//! The check-then-set sequence (`get`, compute, `set`) is not atomic. The cache
//! lookup is a suspension point, so two overlapping calls for the same uncached
//! input can both miss and both invoke the wrapped function. The last `set`
//! wins; both callers receive an equal result because the function is pure.
//! Sequential calls never compute twice.

use std::hash::Hash;
use std::marker::PhantomData;

use tracing::debug;

use super::memory_store::MemoryStore;
use super::traits::AsyncStore;
use crate::types::StoreError;

/// A function wrapped with a per-instance cache
///
/// Created by [`memoize`] or [`Memoized::with_store`]. Each instance owns its
/// own cache; caches are never shared between instances.
#[derive(Debug)]
pub struct Memoized<T, R, F, S> {
    /// The wrapped function
    f: F,
    /// Cache keyed by input, valued by computed result
    cache: S,
    _marker: PhantomData<fn(T) -> R>,
}

/// Wrap `f` with a fresh in-memory cache
pub fn memoize<T, R, F>(f: F) -> Memoized<T, R, F, MemoryStore<T, R>>
where
    T: Hash + Eq + Send + Sync,
    R: Clone + Send + Sync,
    F: Fn(&T) -> R,
{
    Memoized::with_store(f, MemoryStore::new())
}

impl<T, R, F, S> Memoized<T, R, F, S>
where
    F: Fn(&T) -> R,
    S: AsyncStore<T, R>,
{
    /// Wrap `f` using `cache` as the backing store
    ///
    /// The store should start empty; any entries it already holds are treated
    /// as previously computed results.
    pub fn with_store(f: F, cache: S) -> Self {
        Self {
            f,
            cache,
            _marker: PhantomData,
        }
    }

    /// Return the result for `param`, computing it only on a cache miss
    ///
    /// # Returns
    ///
    /// * `Ok(R)` - The cached or freshly computed result
    /// * `Err(StoreError)` - If the backing store fails to store the computed
    ///   result
    pub async fn call(&self, param: T) -> Result<R, StoreError>
    where
        R: Clone,
    {
        match self.cache.get(&param).await {
            Ok(value) => {
                debug!("memo cache hit");
                Ok(value)
            }
            Err(StoreError::MissingKey) => {
                debug!("memo cache miss, computing");
                let value = (self.f)(&param);
                self.cache.set(param, value.clone()).await?;
                Ok(value)
            }
        }
    }

    /// The backing cache
    pub fn cache(&self) -> &S {
        &self.cache
    }
}
