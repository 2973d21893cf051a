use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{Day, TvType};
use crate::state::AppState;

use super::envelope;

/// `GET /schedule/{tv_type}/{day}`: the memoized TV listing.
pub async fn schedule(
    State(state): State<AppState>,
    Path((tv_type, day)): Path<(String, String)>,
) -> AppResult<Json<Value>> {
    let tv_type: TvType = tv_type
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("unknown tv type: {}", tv_type)))?;
    let day: Day = day
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("unknown day: {}", day)))?;

    let rows = state.schedule.schedule(tv_type, day).await?;

    Ok(envelope(json!({
        "type": tv_type,
        "day": day,
        "schedule": rows,
    })))
}
