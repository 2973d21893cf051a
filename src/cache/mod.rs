pub mod memory;
pub mod redis;

use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Local};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AppResult;
use crate::models::{Day, Proposal, TvType, UserId};

pub use memory::MemoryCache;
pub use redis::RedisCache;

/// Memoized schedules live for an hour; proposals roll over at midnight.
pub const SCHEDULE_TTL: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Proposal(UserId),
    Schedule(TvType, Day),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Proposal(user) => write!(f, "proposal:{}", user),
            CacheKey::Schedule(tv_type, day) => write!(f, "schedule:{}:{}", tv_type, day),
        }
    }
}

/// Raw string cache operations; implementations may fail, the typed layer
/// above decides what failure means.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: String) -> AppResult<Option<String>>;
    async fn set(&self, key: String, value: String, ttl_seconds: u64) -> AppResult<()>;
    async fn remove(&self, key: String) -> AppResult<()>;
}

/// Typed JSON cache over any backend. Cache trouble never propagates:
/// failed reads degrade to a miss, failed writes and removals are logged
/// and dropped.
#[derive(Clone)]
pub struct AppCache {
    backend: Arc<dyn CacheBackend>,
}

impl AppCache {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        match self.backend.get(key.to_string()).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed, recomputing");
                None
            }
        }
    }

    pub async fn set_json<T: Serialize>(&self, key: &CacheKey, value: &T, ttl_seconds: u64) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Cache serialization error");
                return;
            }
        };
        if let Err(e) = self.backend.set(key.to_string(), json, ttl_seconds).await {
            tracing::warn!(key = %key, error = %e, "Cache write failed");
        }
    }

    pub async fn remove(&self, key: &CacheKey) {
        if let Err(e) = self.backend.remove(key.to_string()).await {
            tracing::warn!(key = %key, error = %e, "Cache invalidation failed");
        }
    }
}

/// Memoizes the ranked proposal list per user until taste data changes or
/// the day rolls over. Opportunistic only; never a source of truth.
#[derive(Clone)]
pub struct ProposalCache {
    cache: AppCache,
}

impl ProposalCache {
    pub fn new(cache: AppCache) -> Self {
        Self { cache }
    }

    pub async fn get(&self, user: &UserId) -> Option<Vec<Proposal>> {
        self.cache.get_json(&CacheKey::Proposal(user.clone())).await
    }

    pub async fn set(&self, user: &UserId, proposals: &[Proposal]) {
        self.cache
            .set_json(
                &CacheKey::Proposal(user.clone()),
                &proposals,
                seconds_until_tomorrow(),
            )
            .await;
    }

    pub async fn clear(&self, user: &UserId) {
        self.cache.remove(&CacheKey::Proposal(user.clone())).await;
    }
}

/// Seconds from now until local midnight, the proposal rollover point.
pub fn seconds_until_tomorrow() -> u64 {
    let now = Local::now().naive_local();
    let tomorrow = (now + Duration::days(1))
        .date()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time");
    (tomorrow - now).num_seconds().max(1) as u64
}
