//! TTL map — concurrent key-value store with lazy expiry.
//!
//! Both credential maps (authorization codes, access tokens) share these
//! semantics: entries carry an absolute wall-clock deadline, expired entries
//! are treated as absent and evicted on lookup rather than by a background
//! sweep, and `take` is an atomic remove-and-return so consuming an entry
//! (one-time authorization codes) admits exactly one winner under
//! concurrent access.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// Implemented by values that carry their own expiry deadline.
pub trait Expires {
    fn expires_at(&self) -> DateTime<Utc>;
}

/// Concurrent map with lazy TTL enforcement.
pub struct TtlMap<V> {
    entries: DashMap<String, V>,
}

impl<V: Expires + Clone> TtlMap<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn insert(&self, key: String, value: V) {
        self.entries.insert(key, value);
    }

    /// Look up a live entry. An entry at or past its deadline is evicted
    /// and reported absent — callers cannot distinguish expired from
    /// never-existed.
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            if now < entry.value().expires_at() {
                return Some(entry.value().clone());
            }
            drop(entry);
            // Only evict if still expired — a fresh entry may have
            // replaced the one we just inspected.
            self.entries.remove_if(key, |_, v| now >= v.expires_at());
        }
        None
    }

    /// Atomically remove and return an entry, live or not.
    ///
    /// Two concurrent `take`s of the same key see exactly one `Some`;
    /// expiry is the caller's check, since an expired entry must still be
    /// consumed (not left behind) when presented.
    pub fn take(&self, key: &str) -> Option<V> {
        self.entries.remove(key).map(|(_, v)| v)
    }

    /// Remove all expired entries. Lookup already evicts lazily; this is
    /// for callers that want to bound memory without waiting for lookups.
    pub fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, v| now < v.expires_at());
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Expires + Clone> Default for TtlMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ──────────────────────────────────────────────────────
