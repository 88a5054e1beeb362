use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use crate::config::CACHE_TTL_SECS;

/// A cached payload and the instant it was fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub data: String,
    pub timestamp: DateTime<Utc>,
}

/// In-memory payload cache keyed by an opaque string.
///
/// Stale entries are never purged; they are kept as a fallback for when the
/// upstream is down. The key space is a handful of fixed route names, so the
/// map does not need a size bound.
#[derive(Debug)]
pub struct TtlCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(CACHE_TTL_SECS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Entry for `key` regardless of age.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Replace whatever is stored under `key`.
    pub fn put(&self, key: &str, data: String, now: DateTime<Utc>) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                data,
                timestamp: now,
            },
        );
    }

    pub fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.timestamp) < self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new()
    }
}
