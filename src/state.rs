use std::sync::Arc;

use crate::cache::{AppCache, ProposalCache};
use crate::config::TasteWeights;
use crate::notify::Notifier;
use crate::providers::{MetadataProvider, ScheduleProvider};
use crate::services::{CatalogService, ProposalService};
use crate::store::EntityStore;
use crate::taste::TasteLedger;

/// Shared application state: the entity store, the taste ledger and the
/// services wired over them. Everything is behind an Arc so axum can clone
/// the state per request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
    pub ledger: Arc<TasteLedger>,
    pub catalog: Arc<CatalogService>,
    pub proposals: Arc<ProposalService>,
    pub schedule: Arc<dyn ScheduleProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub number_suggestions: usize,
}

impl AppState {
    pub fn new(
        store: Arc<dyn EntityStore>,
        cache: AppCache,
        schedule: Arc<dyn ScheduleProvider>,
        metadata: Arc<dyn MetadataProvider>,
        notifier: Arc<dyn Notifier>,
        weights: TasteWeights,
        number_suggestions: usize,
    ) -> Self {
        let proposal_cache = ProposalCache::new(cache);
        let ledger = Arc::new(TasteLedger::new(
            store.clone(),
            proposal_cache.clone(),
            weights,
        ));
        let catalog = Arc::new(CatalogService::new(
            store.clone(),
            schedule.clone(),
            metadata,
        ));
        let proposals = Arc::new(ProposalService::new(
            store.clone(),
            ledger.clone(),
            schedule.clone(),
            proposal_cache,
            number_suggestions,
        ));

        Self {
            store,
            ledger,
            catalog,
            proposals,
            schedule,
            notifier,
            number_suggestions,
        }
    }
}
