use std::sync::Arc;

use serde::Serialize;

use crate::error::AppResult;
use crate::models::{Day, Movie, TvType};
use crate::providers::{MetadataProvider, RetrievedMovie, ScheduleProvider};
use crate::store::EntityStore;

/// Keeps the local movie/artist catalog populated from the external
/// film-database API, driven by the daily schedule.
pub struct CatalogService {
    store: Arc<dyn EntityStore>,
    schedule: Arc<dyn ScheduleProvider>,
    metadata: Arc<dyn MetadataProvider>,
}

/// Outcome of a schedule-driven refresh run.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct RefreshSummary {
    pub listed: usize,
    pub known: usize,
    pub stored: usize,
    pub skipped: usize,
}

impl CatalogService {
    pub fn new(
        store: Arc<dyn EntityStore>,
        schedule: Arc<dyn ScheduleProvider>,
        metadata: Arc<dyn MetadataProvider>,
    ) -> Self {
        Self {
            store,
            schedule,
            metadata,
        }
    }

    /// Retrieves every movie on the day's listing that the store does not
    /// know yet. Each title is independent: an upstream failure is retried
    /// once, then the title is skipped. Safe to re-run; already-known
    /// titles are counted and left alone.
    pub async fn refresh(&self, tv_type: TvType, day: Day) -> AppResult<RefreshSummary> {
        let rows = self.schedule.schedule(tv_type, day).await?;
        let mut summary = RefreshSummary {
            listed: rows.len(),
            ..Default::default()
        };

        for row in rows {
            let known = self
                .store
                .find_movie_by_title(&row.title, row.original_title.as_deref())
                .await?
                .is_some();
            if known {
                summary.known += 1;
                continue;
            }

            let title = row.resolution_title();
            match self.lookup_with_retry(title).await {
                Ok(retrieved) => {
                    self.store_retrieved(&retrieved).await?;
                    summary.stored += 1;
                }
                Err(e) => {
                    tracing::warn!(title, error = %e, "Skipping title, metadata retrieval failed");
                    summary.skipped += 1;
                }
            }
        }

        tracing::info!(
            listed = summary.listed,
            known = summary.known,
            stored = summary.stored,
            skipped = summary.skipped,
            "Catalog refresh finished"
        );
        Ok(summary)
    }

    /// Store-first movie resolution for taste additions: an already-stored
    /// movie is returned as-is, anything else is retrieved and stored.
    pub async fn ensure_movie_by_title(
        &self,
        title: &str,
        original_title: Option<&str>,
    ) -> AppResult<Movie> {
        if let Some(movie) = self
            .store
            .find_movie_by_title(title, original_title)
            .await?
        {
            return Ok(movie);
        }

        let retrieved = self
            .metadata
            .lookup(original_title.unwrap_or(title))
            .await?;
        self.store_retrieved(&retrieved).await
    }

    async fn lookup_with_retry(&self, title: &str) -> AppResult<RetrievedMovie> {
        match self.metadata.lookup(title).await {
            Ok(retrieved) => Ok(retrieved),
            Err(e) => {
                tracing::warn!(title, error = %e, "Metadata lookup failed, retrying once");
                self.metadata.lookup(title).await
            }
        }
    }

    /// Persists a retrieved movie and its credited artists. Artists already
    /// stored are left untouched; artist records are immutable after
    /// creation.
    async fn store_retrieved(&self, retrieved: &RetrievedMovie) -> AppResult<Movie> {
        for artist in &retrieved.artists {
            if self.store.get_artist(&artist.id).await?.is_none() {
                self.store.put_artist(artist).await?;
            }
        }
        self.store.put_movie(&retrieved.movie).await?;
        Ok(retrieved.movie.clone())
    }
}
