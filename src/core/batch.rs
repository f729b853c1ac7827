//! Concurrent multi-key lookup
//!
//! `get_all` resolves a list of keys against any [`AsyncStore`] with every
//! lookup in flight at once. Lookups may complete in any order; results are
//! always returned in the order of the input keys.

use futures::future::try_join_all;
use tracing::debug;

use super::traits::AsyncStore;
use crate::types::StoreError;

/// Fetch every key in `keys` from `store`
///
/// All gets are issued before any is awaited. Duplicate keys are allowed and
/// each occurrence is resolved on its own.
///
/// # Returns
///
/// * `Ok(Vec<V>)` - One value per key, in input order
/// * `Err(StoreError::MissingKey)` - If any key is absent. The remaining
///   lookups are dropped and no partial results are returned.
pub async fn get_all<K, V, S>(store: &S, keys: &[K]) -> Result<Vec<V>, StoreError>
where
    S: AsyncStore<K, V>,
{
    let values = try_join_all(keys.iter().map(|key| store.get(key))).await;
    debug!(keys = keys.len(), ok = values.is_ok(), "batch fetch finished");
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory_store::MemoryStore;
    use rstest::rstest;
    use std::sync::Mutex;
    use std::time::Duration;

    async fn seeded_store() -> MemoryStore<&'static str, i32> {
        let store = MemoryStore::new();
        store.set("k1", 1).await.unwrap();
        store.set("k2", 2).await.unwrap();
        store.set("k3", 3).await.unwrap();
        store
    }

    #[rstest]
    #[case::in_order(&["k1", "k2", "k3"], vec![1, 2, 3])]
    #[case::reversed(&["k3", "k2", "k1"], vec![3, 2, 1])]
    #[case::duplicates(&["k2", "k2", "k1"], vec![2, 2, 1])]
    #[case::empty(&[], vec![])]
    #[tokio::test]
    async fn test_get_all_present_keys(#[case] keys: &[&'static str], #[case] expected: Vec<i32>) {
        let store = seeded_store().await;
        assert_eq!(get_all(&store, keys).await, Ok(expected));
    }

    #[rstest]
    #[case::first_missing(&["nope", "k1", "k2"])]
    #[case::middle_missing(&["k1", "nope", "k2"])]
    #[case::last_missing(&["k1", "k2", "nope"])]
    #[tokio::test]
    async fn test_get_all_fails_when_any_key_missing(#[case] keys: &[&'static str]) {
        let store = seeded_store().await;
        assert_eq!(get_all(&store, keys).await, Err(StoreError::MissingKey));
    }

    /// Store whose lookups take longer for smaller keys and record completion order
    struct SlowStore {
        completed: Mutex<Vec<u64>>,
    }

    impl AsyncStore<u64, u64> for SlowStore {
        async fn get(&self, key: &u64) -> Result<u64, StoreError> {
            tokio::time::sleep(Duration::from_millis(100 - key * 10)).await;
            self.completed.lock().unwrap().push(*key);
            Ok(key * 2)
        }

        async fn set(&self, _key: u64, _value: u64) -> Result<(), StoreError> {
            Ok(())
        }

        async fn delete(&self, _key: &u64) -> Result<(), StoreError> {
            Err(StoreError::MissingKey)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_all_reorders_to_input_order() {
        let store = SlowStore {
            completed: Mutex::new(Vec::new()),
        };

        let start = tokio::time::Instant::now();
        let values = get_all(&store, &[1, 2, 3]).await.unwrap();

        assert_eq!(values, vec![2, 4, 6]);
        assert_eq!(*store.completed.lock().unwrap(), vec![3, 2, 1]);
        // Gets overlapped: total time is the slowest lookup, not the sum
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(90));
        assert!(elapsed < Duration::from_millis(100), "took {:?}", elapsed);
    }
}
