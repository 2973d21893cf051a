use async_trait::async_trait;

use crate::models::{Proposal, User};

/// Hands a user's daily proposal off for delivery. Delivery mechanics
/// (email, push) live behind this seam and are not the core's concern.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, user: &User, proposals: &[Proposal]);
}

/// Notifier that records deliveries in the log. Stands in wherever a real
/// delivery channel is not configured.
#[derive(Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(&self, user: &User, proposals: &[Proposal]) {
        let titles: Vec<&str> = proposals
            .iter()
            .map(|p| {
                p.original_title
                    .as_deref()
                    .or(p.title.as_deref())
                    .unwrap_or(p.id_catalog.as_str())
            })
            .collect();
        tracing::info!(user = %user.id, count = proposals.len(), ?titles, "Proposal delivered");
    }
}
