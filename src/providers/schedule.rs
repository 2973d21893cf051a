use async_trait::async_trait;
use reqwest::Client as HttpClient;

use crate::cache::{AppCache, CacheKey, SCHEDULE_TTL};
use crate::error::{AppError, AppResult};
use crate::models::{Day, ScheduledMovie, TvType};

/// Supplies the list of movies airing on a given day for a tv-type.
///
/// The ranker treats this as an opaque collaborator: it only ever sees the
/// returned candidate records.
#[async_trait]
pub trait ScheduleProvider: Send + Sync {
    async fn schedule(&self, tv_type: TvType, day: Day) -> AppResult<Vec<ScheduledMovie>>;
}

/// Fetches the upstream TV listing over HTTP and memoizes each
/// (tv-type, day) page for an hour.
pub struct HttpScheduleProvider {
    http_client: HttpClient,
    base_url: String,
    cache: AppCache,
}

impl HttpScheduleProvider {
    pub fn new(base_url: String, cache: AppCache) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
            cache,
        }
    }

    async fn fetch(&self, tv_type: TvType, day: Day) -> AppResult<Vec<ScheduledMovie>> {
        let url = format!("{}/{}/{}", self.base_url, tv_type, day);

        tracing::debug!(%url, "Fetching TV schedule");
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%url, status = %status, "Schedule listing request failed");
            return Err(AppError::Upstream(format!(
                "schedule listing returned status {}",
                status
            )));
        }

        let rows: Vec<ScheduledMovie> = response.json().await?;
        tracing::info!(tv_type = %tv_type, day = %day, rows = rows.len(), "Schedule fetched");
        Ok(rows)
    }
}

#[async_trait]
impl ScheduleProvider for HttpScheduleProvider {
    async fn schedule(&self, tv_type: TvType, day: Day) -> AppResult<Vec<ScheduledMovie>> {
        let key = CacheKey::Schedule(tv_type, day);

        if let Some(cached) = self.cache.get_json::<Vec<ScheduledMovie>>(&key).await {
            tracing::debug!(key = %key, "Serving memoized schedule");
            return Ok(cached);
        }

        let rows = self.fetch(tv_type, day).await?;
        self.cache.set_json(&key, &rows, SCHEDULE_TTL).await;
        Ok(rows)
    }
}
