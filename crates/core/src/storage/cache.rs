use std::sync::Arc;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::MarketConfig;

use super::kv::KeyValueStore;

/// A cached payload wrapped with the timestamp it was stored at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// Epoch milliseconds at write time.
    pub timestamp: i64,
    pub data: T,
}

/// Freshness check. An entry whose age equals the TTL exactly is already
/// expired: stale data must not be served at the boundary.
pub fn is_fresh(timestamp: i64, now: i64, ttl_ms: i64) -> bool {
    now - timestamp < ttl_ms
}

/// TTL cache over a key-value medium.
///
/// Caching is strictly a performance optimization, never a correctness
/// dependency: reads fail soft (missing, stale, or unparsable entries are
/// all a cache miss) and writes fail soft (errors are logged and
/// swallowed, the refresh proceeds with in-memory data).
#[derive(Clone)]
pub struct CacheStore {
    store: Arc<dyn KeyValueStore>,
}

impl CacheStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Fetch the cached payload for a market, if present and fresh.
    pub fn get<T: DeserializeOwned>(&self, config: &MarketConfig) -> Option<T> {
        self.get_at(config, chrono::Utc::now().timestamp_millis())
    }

    /// Like `get`, with an explicit clock for the TTL check.
    pub fn get_at<T: DeserializeOwned>(&self, config: &MarketConfig, now: i64) -> Option<T> {
        let raw = self.store.get(config.cache_key)?;
        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Error reading cache {}: {e}", config.cache_key);
                return None;
            }
        };
        if is_fresh(entry.timestamp, now, config.cache_ttl_ms) {
            debug!("Cache hit for {}", config.cache_key);
            Some(entry.data)
        } else {
            debug!("Cache expired for {}", config.cache_key);
            None
        }
    }

    /// Store a payload under the market's cache key with the current
    /// timestamp. Write failures (quota, I/O) are logged and swallowed.
    pub fn set<T: Serialize>(&self, config: &MarketConfig, data: &T) {
        self.set_at(config, data, chrono::Utc::now().timestamp_millis());
    }

    /// Like `set`, with an explicit timestamp.
    pub fn set_at<T: Serialize>(&self, config: &MarketConfig, data: &T, now: i64) {
        let entry = serde_json::json!({ "timestamp": now, "data": data });
        let text = match serde_json::to_string(&entry) {
            Ok(text) => text,
            Err(e) => {
                warn!("Error serializing cache {}: {e}", config.cache_key);
                return;
            }
        };
        if let Err(e) = self.store.set(config.cache_key, &text) {
            warn!("Error saving cache {}: {e}", config.cache_key);
        }
    }
}
