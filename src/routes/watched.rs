use axum::extract::{Path, State};
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{User, UserId};
use crate::state::AppState;

use super::envelope;
use super::users::require_user;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWatchedRequest {
    pub title: String,
    /// Defaults to today when omitted.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// `GET /api/watched/{user_id}`: the user's watched list.
pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Value>> {
    let user_id = UserId::new(user_id);
    let user = require_user(&state, &user_id).await?;

    let rows = watched_rows(&state, &user).await?;
    Ok(envelope(json!({
        "userId": user_id,
        "watched": rows,
    })))
}

/// `POST /api/watched/{user_id}`: marks a stored movie as watched. The
/// movie must already be in the catalog.
pub async fn add(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<AddWatchedRequest>,
) -> AppResult<Json<Value>> {
    let user_id = UserId::new(user_id);
    let mut user = require_user(&state, &user_id).await?;

    let movie = state
        .store
        .find_movie_by_title(&request.title, Some(&request.title))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("movie '{}' not in catalog", request.title)))?;

    let date = request.date.unwrap_or_else(|| Local::now().date_naive());
    user.add_watched(movie.id.clone(), date);
    state.store.put_user(&user).await?;

    tracing::info!(user = %user_id, movie = %movie.id, %date, "Watched movie recorded");

    let rows = watched_rows(&state, &user).await?;
    Ok(envelope(json!({
        "userId": user_id,
        "watched": rows,
    })))
}

async fn watched_rows(state: &AppState, user: &User) -> AppResult<Vec<Value>> {
    let mut rows = Vec::with_capacity(user.watched.len());
    for entry in &user.watched {
        let movie = state
            .store
            .get_movie(&entry.movie)
            .await?
            .ok_or_else(|| AppError::Consistency(format!("movie {} not in store", entry.movie)))?;
        rows.push(json!({
            "idCatalog": entry.movie,
            "originalTitle": movie.original_title,
            "poster": movie.poster,
            "date": entry.date,
        }));
    }
    Ok(rows)
}
