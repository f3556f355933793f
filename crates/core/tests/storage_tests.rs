// ═══════════════════════════════════════════════════════════════════
// Storage Tests — KeyValueStore impls and the TTL cache
// ═══════════════════════════════════════════════════════════════════

use std::sync::Arc;

use portfolio_tracker_core::config::MarketConfig;
use portfolio_tracker_core::errors::CoreError;
use portfolio_tracker_core::storage::cache::{is_fresh, CacheStore};
use portfolio_tracker_core::storage::kv::{FileStore, KeyValueStore, MemoryStore};

fn test_config() -> MarketConfig {
    MarketConfig {
        base_url: "https://example.test/api",
        storage_key: "test_token",
        token_prompt: "token?",
        update_token_prompt: "new token?",
        cache_key: "test_cache",
        cache_ttl_ms: 1_000,
    }
}

// ═══════════════════════════════════════════════════════════════════
// MemoryStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[test]
    fn get_missing_key_is_none() {
        let store = MemoryStore::new();
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn set_then_get() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn set_overwrites() {
        let store = MemoryStore::new();
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v2"));
    }

    #[test]
    fn remove_deletes_the_key() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert!(store.get("k").is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileStore
// ═══════════════════════════════════════════════════════════════════

mod file_store {
    use super::*;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("store.json")).unwrap();
        assert!(store.get("anything").is_none());
    }

    #[test]
    fn entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path).unwrap();
        store.set("brapi_token", "abc123").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("brapi_token").as_deref(), Some("abc123"));
    }

    #[test]
    fn remove_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path).unwrap();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert!(reopened.get("k").is_none());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json at all {").unwrap();

        match FileStore::open(&path) {
            Err(CoreError::Storage(msg)) => assert!(msg.contains("corrupt")),
            other => panic!("Expected Storage error, got {other:?}"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Freshness predicate — boundary at age == ttl is expired
// ═══════════════════════════════════════════════════════════════════

mod freshness {
    use super::*;

    #[test]
    fn younger_than_ttl_is_fresh() {
        assert!(is_fresh(1_000, 1_999, 1_000));
    }

    #[test]
    fn age_equal_to_ttl_is_expired() {
        assert!(!is_fresh(1_000, 2_000, 1_000));
    }

    #[test]
    fn older_than_ttl_is_expired() {
        assert!(!is_fresh(1_000, 5_000, 1_000));
    }

    #[test]
    fn zero_age_is_fresh() {
        assert!(is_fresh(1_000, 1_000, 1_000));
    }
}

// ═══════════════════════════════════════════════════════════════════
// CacheStore — fail-soft TTL cache over a key-value store
// ═══════════════════════════════════════════════════════════════════

mod cache_store {
    use super::*;

    fn cache_over(store: Arc<dyn KeyValueStore>) -> CacheStore {
        CacheStore::new(store)
    }

    #[test]
    fn set_then_get_returns_payload() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_over(store);
        let config = test_config();

        cache.set_at(&config, &vec!["a".to_string(), "b".to_string()], 10_000);
        let got: Vec<String> = cache.get_at(&config, 10_500).unwrap();
        assert_eq!(got, vec!["a", "b"]);
    }

    #[test]
    fn entry_at_exact_ttl_age_is_a_miss() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_over(store);
        let config = test_config();

        cache.set_at(&config, &42u32, 10_000);
        assert_eq!(cache.get_at::<u32>(&config, 10_999), Some(42));
        assert_eq!(cache.get_at::<u32>(&config, 11_000), None);
        assert_eq!(cache.get_at::<u32>(&config, 20_000), None);
    }

    #[test]
    fn missing_entry_is_a_miss() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_over(store);
        assert_eq!(cache.get_at::<u32>(&test_config(), 0), None);
    }

    #[test]
    fn malformed_entries_are_a_miss_not_an_error() {
        let store = Arc::new(MemoryStore::new());
        let config = test_config();
        let cache = cache_over(store.clone());

        for garbage in ["", "not json", "[1,2,3", "{\"data\": 1}", "{\"timestamp\": \"x\"}"] {
            store.set(config.cache_key, garbage).unwrap();
            assert_eq!(cache.get_at::<u32>(&config, 0), None, "for {garbage:?}");
        }
    }

    #[test]
    fn wrong_payload_shape_is_a_miss() {
        let store = Arc::new(MemoryStore::new());
        let config = test_config();
        let cache = cache_over(store);

        cache.set_at(&config, &"a string", 10_000);
        assert_eq!(cache.get_at::<Vec<u32>>(&config, 10_001), None);
    }

    #[test]
    fn entry_wire_format_embeds_timestamp_and_data() {
        let store = Arc::new(MemoryStore::new());
        let config = test_config();
        cache_over(store.clone()).set_at(&config, &7u32, 123);

        let raw = store.get(config.cache_key).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["timestamp"], 123);
        assert_eq!(value["data"], 7);
    }

    /// A store whose writes always fail, as under a storage quota.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), CoreError> {
            Err(CoreError::Storage("quota exceeded".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), CoreError> {
            Err(CoreError::Storage("quota exceeded".into()))
        }
    }

    #[test]
    fn write_failures_are_swallowed() {
        let cache = cache_over(Arc::new(ReadOnlyStore));
        let config = test_config();
        // Must not panic or propagate; caching is a pure optimization.
        cache.set_at(&config, &1u32, 0);
        assert_eq!(cache.get_at::<u32>(&config, 0), None);
    }
}
