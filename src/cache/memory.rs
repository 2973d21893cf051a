use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::AppResult;

use super::CacheBackend;

/// In-process cache backend with per-entry expiry, for tests and
/// redis-less local runs.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: String) -> AppResult<Option<String>> {
        let mut entries = self.entries.lock().await;
        match entries.get(&key) {
            Some((value, deadline)) if *deadline > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(&key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: String, value: String, ttl_seconds: u64) -> AppResult<()> {
        let deadline = Instant::now() + Duration::from_secs(ttl_seconds);
        self.entries.lock().await.insert(key, (value, deadline));
        Ok(())
    }

    async fn remove(&self, key: String) -> AppResult<()> {
        self.entries.lock().await.remove(&key);
        Ok(())
    }
}
