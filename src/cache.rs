use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Thread-safe map whose entries expire after a fixed TTL
pub struct TtlCache<K, V> {
    data: DashMap<K, CacheEntry<V>>,
    ttl: Duration,
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<K, V> TtlCache<K, V>
where
    K: std::hash::Hash + Eq + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            data: DashMap::new(),
            ttl,
        }
    }

    /// Get a live value; expired entries are evicted on access
    pub fn get(&self, key: &K) -> Option<V> {
        let entry = self.data.get(key)?;
        if entry.expires_at > Instant::now() {
            Some(entry.value.clone())
        } else {
            drop(entry);
            self.data.remove(key);
            None
        }
    }

    /// Insert a value, stamping it with the cache TTL
    pub fn insert(&self, key: K, value: V) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.data.insert(key, entry);
    }

    /// Drop every expired entry
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.data.retain(|_, entry| entry.expires_at > now);
    }

    /// Number of entries, expired ones included
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Cache for geocoding lookups, keyed by normalized city string
pub type GeoCache = Arc<TtlCache<String, CachedLocation>>;

/// Geocoding result held in the cache
#[derive(Debug, Clone)]
pub struct CachedLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
}

const GEO_CACHE_TTL_SECS: u64 = 24 * 60 * 60;
const PURGE_INTERVAL_SECS: u64 = 60 * 60;

/// Create the geocoding cache (24-hour TTL)
pub fn create_geo_cache() -> GeoCache {
    Arc::new(TtlCache::new(Duration::from_secs(GEO_CACHE_TTL_SECS)))
}

/// Normalize a city string for use as a cache key
pub fn normalize_cache_key(city: &str) -> String {
    city.trim().to_lowercase()
}

/// Spawn a background task that purges expired geocoding entries hourly
pub fn start_cache_purge_task(cache: GeoCache) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(PURGE_INTERVAL_SECS));
        loop {
            interval.tick().await;
            let before = cache.len();
            cache.purge_expired();
            let after = cache.len();
            if before != after {
                tracing::debug!(
                    removed = before - after,
                    remaining = after,
                    "Purged expired geocoding entries"
                );
            }
        }
    });
}
