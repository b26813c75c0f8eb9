use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

struct Entry<T> {
    value: T,
    expires_at: Instant,
}

/// Time-expiring key/value store for recomputable results.
///
/// Explicitly constructed and owned by whoever needs it (the pipeline holds
/// one), never a module-level global. Entries are idempotently recomputable,
/// so a lost update between two writers of the same key is acceptable: last
/// writer wins.
pub struct ResultCache<T> {
    entries: Mutex<HashMap<String, Entry<T>>>,
}

impl<T: Clone> ResultCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch a live entry, dropping it if the deadline has passed.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                debug!(key, "cache hit");
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!(key, "cache entry expired");
            entries.remove(key);
        }
        None
    }

    pub fn insert(&self, key: impl Into<String>, value: T, ttl: Duration) {
        let key = key.into();
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        debug!(key = %key, ?ttl, "cache set");
        entries.insert(
            key,
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Drop every entry whose deadline has passed.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.retain(|_, entry| entry.expires_at > now);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().expect("cache mutex poisoned").clear();
    }
}

impl<T: Clone> Default for ResultCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
