use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

#[derive(Clone)]
struct CacheEntry {
    value: String,
    ttl: Duration,
}

// 每个条目使用写入时给定的 TTL
struct PerEntryTtl;

impl Expiry<String, CacheEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

pub struct MokaCacheWrapper {
    inner: Cache<String, CacheEntry>,
    default_ttl: u64,
}

impl MokaCacheWrapper {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        if config.cache.default_ttl == 0 {
            return Err("cache.default_ttl must be greater than zero".to_string());
        }

        let inner = Cache::builder()
            .max_capacity(config.cache.memory.max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}",
            config.cache.memory.max_capacity
        );
        Ok(Self {
            inner,
            default_ttl: config.cache.default_ttl,
        })
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        if let Some(entry) = self.inner.get(key).await {
            debug!("Successfully retrieved key: {}", key);
            CacheResult::Found(entry.value)
        } else {
            debug!("Key not found in cache: {}", key);
            CacheResult::NotFound
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let effective_ttl = if ttl == 0 { self.default_ttl } else { ttl };
        self.inner
            .insert(
                key,
                CacheEntry {
                    value,
                    ttl: Duration::from_secs(effective_ttl),
                },
            )
            .await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_insert_get_remove() {
        crate::test_support::init_config();
        let cache = MokaCacheWrapper::new().unwrap();

        cache.insert_raw("a".into(), "1".into(), 60).await;
        assert_eq!(cache.get_raw("a").await, CacheResult::Found("1".into()));

        cache.remove("a").await;
        assert_eq!(cache.get_raw("a").await, CacheResult::NotFound);
    }

    #[actix_web::test]
    async fn test_entry_expires_after_its_own_ttl() {
        crate::test_support::init_config();
        let cache = MokaCacheWrapper::new().unwrap();

        cache.insert_raw("short".into(), "x".into(), 1).await;
        cache.insert_raw("long".into(), "y".into(), 600).await;
        actix_web::rt::time::sleep(Duration::from_millis(1200)).await;

        assert_eq!(cache.get_raw("short").await, CacheResult::NotFound);
        assert_eq!(cache.get_raw("long").await, CacheResult::Found("y".into()));
    }
}
