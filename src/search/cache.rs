use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Duration, Utc};

/// Default freshness window for fetched responses
pub const DEFAULT_WINDOW_SECS: i64 = 60;

/// Whether a response fetched at `fetched_at` may still be reused at `now`
pub fn is_fresh(now: DateTime<Utc>, fetched_at: DateTime<Utc>, window: Duration) -> bool {
    now - fetched_at < window
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    fetched_at: DateTime<Utc>,
}

/// Responses keyed by request, reusable for a fixed window after fetching.
///
/// Entries are never invalidated; a stale entry is still readable through
/// [`ResponseCache::get`] until it is overwritten by a newer response.
/// Size is bounded by the number of distinct keys.
#[derive(Debug, Clone)]
pub struct ResponseCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    window: Duration,
}

impl<K: Eq + Hash, V> ResponseCache<K, V> {
    pub fn new(window: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Value for `key` if it was fetched within the window
    pub fn get_fresh(&self, key: &K, now: DateTime<Utc>) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|entry| is_fresh(now, entry.fetched_at, self.window))
            .map(|entry| &entry.value)
    }

    /// Value for `key` regardless of age
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    pub fn insert(&mut self, key: K, value: V, fetched_at: DateTime<Utc>) {
        self.entries.insert(key, CacheEntry { value, fetched_at });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, V> Default for ResponseCache<K, V> {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_WINDOW_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn freshness_window_is_exclusive() {
        let window = Duration::seconds(60);

        assert!(is_fresh(at(0), at(0), window));
        assert!(is_fresh(at(59), at(0), window));
        assert!(!is_fresh(at(60), at(0), window));
    }

    #[test]
    fn stale_entries_are_hidden_from_get_fresh_only() {
        let mut cache: ResponseCache<String, u32> = ResponseCache::default();
        cache.insert("Toyota".to_string(), 7, at(0));

        assert_eq!(cache.get_fresh(&"Toyota".to_string(), at(30)), Some(&7));
        assert_eq!(cache.get_fresh(&"Toyota".to_string(), at(61)), None);
        assert_eq!(cache.get(&"Toyota".to_string()), Some(&7));
        assert_eq!(cache.get_fresh(&"Honda".to_string(), at(0)), None);
    }

    #[test]
    fn insert_refreshes_timestamp() {
        let mut cache: ResponseCache<&str, u32> = ResponseCache::new(Duration::seconds(10));
        cache.insert("BMW", 1, at(0));
        cache.insert("BMW", 2, at(20));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get_fresh(&"BMW", at(25)), Some(&2));
    }
}
