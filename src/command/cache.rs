use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory cache of read-command payloads, keyed by
/// [`crate::command::Request::cache_key`].
///
/// Reads are synchronous. Staleness is tracked by a `dirty` flag on each
/// entry rather than eviction: mutations mark everything dirty, and a dirty
/// entry behaves like a miss until the next successful read overwrites it.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Value,
    dirty: bool,
}

impl ResponseCache {
    pub fn new() -> Self {
        ResponseCache::default()
    }

    /// Fresh payload for `key`, if any.
    pub fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.lock().unwrap();
        entries
            .get(key)
            .filter(|entry| !entry.dirty)
            .map(|entry| entry.payload.clone())
    }

    pub fn put(&self, key: impl Into<String>, payload: Value) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            key.into(),
            CacheEntry {
                payload,
                dirty: false,
            },
        );
    }

    /// Mark every entry dirty. Called after any mutation command, since a
    /// write to one resource can change counts and pages of others.
    pub fn invalidate_all(&self) {
        let mut entries = self.entries.lock().unwrap();
        for entry in entries.values_mut() {
            entry.dirty = true;
        }
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_returns_fresh_entries() {
        let cache = ResponseCache::new();
        assert_eq!(cache.get("k"), None);
        cache.put("k", json!({"a": 1}));
        assert_eq!(cache.get("k"), Some(json!({"a": 1})));
    }

    #[test]
    fn test_dirty_entries_behave_like_misses() {
        let cache = ResponseCache::new();
        cache.put("k", json!(1));
        cache.invalidate_all();
        assert_eq!(cache.get("k"), None);

        // a new successful read makes the entry fresh again
        cache.put("k", json!(2));
        assert_eq!(cache.get("k"), Some(json!(2)));
    }

    #[test]
    fn test_clear() {
        let cache = ResponseCache::new();
        cache.put("k", json!(1));
        cache.clear();
        assert_eq!(cache.get("k"), None);
    }
}
