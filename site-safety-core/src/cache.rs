//! TTL cache for WHOIS registration ages.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use crate::traits::Clock;

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    age_days: Option<u64>,
    expires_at: DateTime<Utc>,
}

/// Process-wide WHOIS cache keyed by normalized domain.
///
/// Expired entries are evicted lazily: on read for that domain, and in bulk
/// on every insert so the map stays bounded by what one TTL window sees.
/// Writes are last-writer-wins; two concurrent misses for the same domain
/// may both fetch.
pub struct WhoisCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl WhoisCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
        }
    }

    /// Cached age for `domain`.
    ///
    /// # Returns
    /// * `None` - no live entry
    /// * `Some(None)` - a cached "age unknown"
    /// * `Some(Some(days))` - a cached age
    pub async fn get(&self, domain: &str) -> Option<Option<u64>> {
        let now = self.clock.now();
        {
            let entries = self.entries.read().await;
            match entries.get(domain) {
                None => return None,
                Some(entry) if now <= entry.expires_at => return Some(entry.age_days),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        // Re-check: another writer may have refreshed the entry meanwhile.
        if let Some(entry) = entries.get(domain) {
            if now <= entry.expires_at {
                return Some(entry.age_days);
            }
            log::debug!("[WHOIS] Cache entry for {domain} expired");
            entries.remove(domain);
        }
        None
    }

    /// Store an age with a fresh TTL, dropping every already expired entry.
    pub async fn insert(&self, domain: &str, age_days: Option<u64>) {
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| now <= entry.expires_at);
        entries.insert(
            domain.to_string(),
            CacheEntry {
                age_days,
                expires_at,
            },
        );
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
