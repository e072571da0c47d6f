//! Content-addressed cache of already-embedded text, so re-ingesting an
//! unchanged résumé or job description skips the model entirely.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

/// Default capacity: enough to cover a handful of in-flight documents' worth
/// of skill/responsibility/title/experience strings without growing
/// unbounded under sustained load.
pub const DEFAULT_CAPACITY: usize = 4096;

pub struct EmbedCache {
    inner: Mutex<LruCache<u64, Vec<f64>>>,
}

impl EmbedCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    #[must_use]
    pub fn key_for(text: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        hasher.finish()
    }

    #[must_use]
    pub fn get(&self, key: u64) -> Option<Vec<f64>> {
        self.inner.lock().expect("cache mutex poisoned").get(&key).cloned()
    }

    pub fn put(&self, key: u64, vector: Vec<f64>) {
        self.inner.lock().expect("cache mutex poisoned").put(key, vector);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("cache mutex poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EmbedCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_round_trips() {
        let cache = EmbedCache::new(8);
        let key = EmbedCache::key_for("Rust");
        assert!(cache.get(key).is_none());
        cache.put(key, vec![1.0, 0.0]);
        assert_eq!(cache.get(key), Some(vec![1.0, 0.0]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn same_text_hashes_to_same_key() {
        assert_eq!(EmbedCache::key_for("abc"), EmbedCache::key_for("abc"));
        assert_ne!(EmbedCache::key_for("abc"), EmbedCache::key_for("abd"));
    }

    #[test]
    fn evicts_oldest_when_over_capacity() {
        let cache = EmbedCache::new(2);
        let k1 = EmbedCache::key_for("one");
        let k2 = EmbedCache::key_for("two");
        let k3 = EmbedCache::key_for("three");
        cache.put(k1, vec![1.0]);
        cache.put(k2, vec![2.0]);
        cache.put(k3, vec![3.0]);
        assert_eq!(cache.len(), 2);
        assert!(cache.get(k1).is_none());
        assert!(cache.get(k3).is_some());
    }
}
