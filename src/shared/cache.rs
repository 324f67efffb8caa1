//! Memoizing cache. Key -> value, computed at most once per key for the life of the cache.
//!
//! Each key owns a `OnceCell`; the DashMap shard lock is held only while the cell is
//! fetched or inserted, never while the value is being computed. Concurrent first
//! callers for one key wait on the same cell, callers for other keys do not contend.
//! No eviction, no TTL: the cache lives for one run and is dropped with it.

use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

pub struct MemoCache<V> {
    entries: DashMap<String, Arc<OnceCell<V>>>,
}

impl<V> MemoCache<V>
where
    V: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Return the value stored under `key`, running `compute` only if none is stored yet.
    ///
    /// A failed computation stores nothing; the next caller for `key` computes again.
    pub async fn get_or_try_compute<F, Fut, E>(&self, key: &str, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = self.cell_for(key);
        cell.get_or_try_init(compute).await.cloned()
    }

    /// Stored value for `key`, if its computation has completed.
    pub fn get(&self, key: &str) -> Option<V> {
        self.entries
            .get(key)
            .and_then(|cell| cell.value().get().cloned())
    }

    /// Number of keys with a completed value.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|cell| cell.value().initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell_for(&self, key: &str) -> Arc<OnceCell<V>> {
        if let Some(cell) = self.entries.get(key) {
            return Arc::clone(cell.value());
        }
        Arc::clone(self.entries.entry(key.to_string()).or_default().value())
    }
}

impl<V> Default for MemoCache<V>
where
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_hit_skips_compute() {
        let cache: MemoCache<String> = MemoCache::new();
        let calls = AtomicUsize::new(0);
        let compute = |value: &'static str| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<_, ()>(value.to_string()) }
        };

        let first = cache.get_or_try_compute("k", || compute("v1")).await.unwrap();
        let second = cache.get_or_try_compute("k", || compute("v2")).await.unwrap();

        assert_eq!(first, "v1");
        assert_eq!(second, "v1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get("k").as_deref(), Some("v1"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_first_access_computes_once() {
        let cache = Arc::new(MemoCache::<u64>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..200 {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_try_compute("shared", || async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok::<_, ()>(42)
                    })
                    .await
                    .unwrap()
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_compute_is_not_cached() {
        let cache: MemoCache<u32> = MemoCache::new();
        let err = cache
            .get_or_try_compute("k", || async { Err::<u32, _>("boom") })
            .await;
        assert_eq!(err, Err("boom"));
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());

        let ok = cache
            .get_or_try_compute("k", || async { Ok::<_, &str>(7) })
            .await;
        assert_eq!(ok, Ok(7));
    }

    #[tokio::test]
    async fn test_distinct_keys_are_independent() {
        let cache: MemoCache<&'static str> = MemoCache::new();
        cache
            .get_or_try_compute("translate<->a", || async { Ok::<_, ()>("x") })
            .await
            .unwrap();
        cache
            .get_or_try_compute("score<->a", || async { Ok::<_, ()>("y") })
            .await
            .unwrap();

        assert_eq!(cache.get("translate<->a"), Some("x"));
        assert_eq!(cache.get("score<->a"), Some("y"));
        assert_eq!(cache.len(), 2);
    }
}
