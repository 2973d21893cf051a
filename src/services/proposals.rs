use std::collections::HashSet;
use std::sync::Arc;

use crate::cache::ProposalCache;
use crate::error::AppResult;
use crate::models::{Day, Proposal, ScheduledMovie, TvType, User};
use crate::notify::Notifier;
use crate::providers::ScheduleProvider;
use crate::ranking::{self, ResolvedCandidate};
use crate::store::EntityStore;
use crate::taste::TasteLedger;

/// Builds and caches per-user ranked proposals for today's schedule.
pub struct ProposalService {
    store: Arc<dyn EntityStore>,
    ledger: Arc<TasteLedger>,
    schedule: Arc<dyn ScheduleProvider>,
    cache: ProposalCache,
    number_suggestions: usize,
}

impl ProposalService {
    pub fn new(
        store: Arc<dyn EntityStore>,
        ledger: Arc<TasteLedger>,
        schedule: Arc<dyn ScheduleProvider>,
        cache: ProposalCache,
        number_suggestions: usize,
    ) -> Self {
        Self {
            store,
            ledger,
            schedule,
            cache,
            number_suggestions,
        }
    }

    /// The user's full ranked proposal list for today, from cache when the
    /// taste data has not changed since it was computed.
    pub async fn ranked_for(&self, user: &User) -> AppResult<Vec<Proposal>> {
        if let Some(cached) = self.cache.get(&user.id).await {
            tracing::debug!(user = %user.id, "Serving cached proposal");
            return Ok(cached);
        }

        let rows = self.todays_candidates(user).await?;
        let resolved = self.resolve(rows).await?;
        let snapshot = self.ledger.snapshot(user).await?;
        let ranked = ranking::rank(user, &snapshot, resolved);

        let proposals: Vec<Proposal> = ranked
            .iter()
            .map(|r| Proposal::from_ranked(&r.movie, &r.slot))
            .collect();

        self.cache.set(&user.id, &proposals).await;
        tracing::info!(user = %user.id, proposals = proposals.len(), "Proposal computed");
        Ok(proposals)
    }

    /// Computes (or serves) every user's proposal and hands the configured
    /// number of rows to the notifier. A failing user is logged and
    /// skipped.
    pub async fn suggest_all(&self, notifier: &dyn Notifier) -> AppResult<usize> {
        let users = self.store.list_users().await?;
        let mut delivered = 0;

        for user in users {
            match self.ranked_for(&user).await {
                Ok(proposals) => {
                    let count = proposals.len().min(self.number_suggestions);
                    notifier.deliver(&user, &proposals[..count]).await;
                    delivered += 1;
                }
                Err(e) => {
                    tracing::warn!(user = %user.id, error = %e, "Skipping user, proposal failed");
                }
            }
        }

        Ok(delivered)
    }

    /// Today's schedule across every tv-type the user subscribed to.
    async fn todays_candidates(&self, user: &User) -> AppResult<Vec<ScheduledMovie>> {
        let tv_types: &[TvType] = if user.tv_types.is_empty() {
            &[TvType::Free]
        } else {
            &user.tv_types
        };

        let mut rows = Vec::new();
        for tv_type in tv_types {
            rows.extend(self.schedule.schedule(*tv_type, Day::Today).await?);
        }
        Ok(rows)
    }

    /// Matches schedule rows to stored movies. A row with no stored
    /// counterpart cannot be proposed (there is no catalog id to answer
    /// with), so it is logged and dropped rather than scored at zero. A
    /// movie airing on several channels is kept once, first slot wins.
    async fn resolve(&self, rows: Vec<ScheduledMovie>) -> AppResult<Vec<ResolvedCandidate>> {
        let mut seen: HashSet<_> = HashSet::new();
        let mut resolved = Vec::new();

        for row in rows {
            match self
                .store
                .find_movie_by_title(&row.title, row.original_title.as_deref())
                .await?
            {
                Some(movie) => {
                    if seen.insert(movie.id.clone()) {
                        resolved.push(ResolvedCandidate { slot: row, movie });
                    }
                }
                None => {
                    tracing::error!(title = row.resolution_title(), "Not in catalog, dropping candidate");
                }
            }
        }

        Ok(resolved)
    }
}
