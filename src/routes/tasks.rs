use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{Day, TvType};
use crate::state::AppState;

use super::envelope;

/// `GET /task/suggest`: computes and delivers every user's daily
/// proposal. Meant to be hit by the scheduler, not by clients.
pub async fn suggest(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let delivered = state.proposals.suggest_all(state.notifier.as_ref()).await?;
    Ok(envelope(json!({
        "delivered": delivered,
        "message": "Suggestions sent",
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveQuery {
    #[serde(default)]
    pub tv_type: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
}

/// `GET /task/retrieve`: populates the catalog from the day's listing.
pub async fn retrieve(
    State(state): State<AppState>,
    Query(query): Query<RetrieveQuery>,
) -> AppResult<Json<Value>> {
    let tv_type = match query.tv_type.as_deref() {
        Some(raw) => raw
            .parse::<TvType>()
            .map_err(|_| AppError::InvalidInput(format!("unknown tv type: {}", raw)))?,
        None => TvType::Free,
    };
    let day = match query.day.as_deref() {
        Some(raw) => raw
            .parse::<Day>()
            .map_err(|_| AppError::InvalidInput(format!("unknown day: {}", raw)))?,
        None => Day::Today,
    };

    let summary = state.catalog.refresh(tv_type, day).await?;
    Ok(envelope(json!({
        "type": tv_type,
        "day": day,
        "summary": summary,
    })))
}
