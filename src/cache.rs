//! Generic TTL+LRU cache shared across response types (§4.1).
//!
//! Keyed by string, holding opaque values. `created_at`-based eviction (not
//! `last_accessed`) keeps eviction O(n log n) only on overflow and avoids
//! write amplification on reads — see original spec rationale.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

struct CacheEntry<V> {
    value: V,
    created_at: Instant,
    expires_at: Instant,
}

struct Inner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    max_entries: usize,
}

/// A mapping from string keys to values carrying a per-entry expiry. All
/// operations are safe under concurrent access.
pub struct Cache<V> {
    inner: Mutex<Inner<V>>,
}

impl<V: Clone> Cache<V> {
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                max_entries,
            }),
        }
    }

    /// Returns the value iff present and not expired; otherwise removes the
    /// entry (if present) and returns `None`.
    pub async fn get(&self, key: &str) -> Option<V> {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();
        match inner.entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.value.clone()),
            Some(_) => {
                inner.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Replaces any existing entry. `ttl <= 0` means the entry is
    /// immediately expired and will never be returned.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();
        let expires_at = now.checked_add(ttl).unwrap_or(now);
        inner.entries.insert(
            key.into(),
            CacheEntry {
                value,
                created_at: now,
                expires_at,
            },
        );

        if inner.entries.len() > inner.max_entries {
            sweep_expired(&mut inner.entries, now);
        }
        if inner.entries.len() > inner.max_entries {
            evict_oldest_tenth(&mut inner.entries);
        }
    }

    pub async fn delete(&self, key: &str) {
        self.inner.lock().await.entries.remove(key);
    }

    pub async fn clear(&self) {
        self.inner.lock().await.entries.clear();
    }

    pub async fn size(&self) -> usize {
        self.inner.lock().await.entries.len()
    }
}

fn sweep_expired<V>(entries: &mut HashMap<String, CacheEntry<V>>, now: Instant) {
    entries.retain(|_, entry| entry.expires_at > now);
}

/// Evict the 10% of entries with the oldest `created_at` (at least 1).
fn evict_oldest_tenth<V>(entries: &mut HashMap<String, CacheEntry<V>>) {
    let to_evict = (entries.len() / 10).max(1);
    let mut by_age: Vec<(String, Instant)> = entries
        .iter()
        .map(|(k, v)| (k.clone(), v.created_at))
        .collect();
    by_age.sort_by_key(|(_, created_at)| *created_at);
    for (key, _) in by_age.into_iter().take(to_evict) {
        entries.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn get_returns_value_within_ttl() {
        let cache = Cache::new(10);
        cache.set("k", 42, Duration::from_secs(60)).await;
        assert_eq!(cache.get("k").await, Some(42));
    }

    #[tokio::test]
    async fn get_returns_none_after_ttl() {
        let cache = Cache::new(10);
        cache.set("k", 42, Duration::from_millis(1)).await;
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(cache.get("k").await, None);
        assert_eq!(cache.size().await, 0);
    }

    #[tokio::test]
    async fn zero_ttl_never_returns() {
        let cache = Cache::new(10);
        cache.set("k", 1, Duration::from_secs(0)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn size_bounded_by_max_entries() {
        let cache: Cache<i32> = Cache::new(5);
        for i in 0..20 {
            cache
                .set(format!("k{i}"), i, Duration::from_secs(60))
                .await;
        }
        assert!(cache.size().await <= 5);
    }

    #[tokio::test]
    async fn delete_and_clear() {
        let cache = Cache::new(10);
        cache.set("k", 1, Duration::from_secs(60)).await;
        cache.delete("k").await;
        assert_eq!(cache.get("k").await, None);

        cache.set("a", 1, Duration::from_secs(60)).await;
        cache.set("b", 2, Duration::from_secs(60)).await;
        cache.clear().await;
        assert_eq!(cache.size().await, 0);
    }

    #[tokio::test]
    async fn overflow_evicts_oldest_created_first() {
        let cache: Cache<i32> = Cache::new(3);
        cache.set("first", 1, Duration::from_secs(60)).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        cache.set("second", 2, Duration::from_secs(60)).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        cache.set("third", 3, Duration::from_secs(60)).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        cache.set("fourth", 4, Duration::from_secs(60)).await;

        assert_eq!(cache.get("first").await, None);
        assert_eq!(cache.get("fourth").await, Some(4));
    }
}
