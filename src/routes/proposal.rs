use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::models::UserId;
use crate::state::AppState;

use super::envelope;
use super::users::require_user;

#[derive(Debug, Deserialize)]
pub struct ProposalQuery {
    /// Rows to return; defaults to the configured suggestion count. The
    /// full ranked list stays cached, so paging through it is free.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// `GET /api/proposal/{user_id}`: today's ranked proposal for the user.
pub async fn proposal(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ProposalQuery>,
) -> AppResult<Json<Value>> {
    let user_id = UserId::new(user_id);
    let user = require_user(&state, &user_id).await?;

    let ranked = state.proposals.ranked_for(&user).await?;
    let limit = query.limit.unwrap_or(state.number_suggestions);
    let rows = &ranked[..ranked.len().min(limit)];

    Ok(envelope(json!({
        "userId": user_id,
        "proposal": rows,
    })))
}
