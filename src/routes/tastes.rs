use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{ArtistId, CatalogId, TasteKey, TasteTarget, User, UserId};
use crate::state::AppState;

use super::envelope;
use super::users::require_user;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTasteRequest {
    /// Movie tastes are added by title (resolved store-first, retrieved on
    /// a miss).
    #[serde(default)]
    pub title: Option<String>,
    /// Artist tastes are added by catalog id; the record must already be
    /// stored.
    #[serde(default)]
    pub id: Option<String>,
    /// Genre tastes are added by name; unknown names are tolerated.
    #[serde(default)]
    pub genre: Option<String>,
}

/// `GET /api/tastes/{user_id}/{kind}`: lists a user's tastes of one kind.
pub async fn list(
    State(state): State<AppState>,
    Path((user_id, kind)): Path<(String, String)>,
) -> AppResult<Json<Value>> {
    let user_id = UserId::new(user_id);
    let user = require_user(&state, &user_id).await?;

    let tastes = match kind.as_str() {
        "movie" => movie_tastes(&state, &user).await?,
        "artist" => artist_tastes(&state, &user).await?,
        "genre" => genre_tastes(&state, &user).await?,
        _ => {
            return Err(AppError::InvalidInput(format!(
                "unknown taste kind: {}",
                kind
            )))
        }
    };

    Ok(envelope(json!({
        "userId": user_id,
        "type": kind,
        "tastes": tastes,
    })))
}

/// `POST /api/tastes/{user_id}/{kind}`: adds one taste and returns the
/// updated list of that kind.
pub async fn add(
    State(state): State<AppState>,
    Path((user_id, kind)): Path<(String, String)>,
    Json(request): Json<AddTasteRequest>,
) -> AppResult<Json<Value>> {
    let user_id = UserId::new(user_id);
    require_user(&state, &user_id).await?;

    match kind.as_str() {
        "movie" => {
            let title = request
                .title
                .ok_or_else(|| AppError::InvalidInput("missing movie title".to_string()))?;
            let movie = state
                .catalog
                .ensure_movie_by_title(&title, Some(&title))
                .await?;
            state.ledger.add_taste_movie(&user_id, &movie.id, 1.0).await?;
        }
        "artist" => {
            let raw = request
                .id
                .ok_or_else(|| AppError::InvalidInput("missing artist id".to_string()))?;
            let artist_id = ArtistId::parse(&raw)?;
            state
                .ledger
                .add_taste_artist(&user_id, &artist_id, 1.0)
                .await?;
        }
        "genre" => {
            let genre = request
                .genre
                .ok_or_else(|| AppError::InvalidInput("missing genre".to_string()))?;
            state.ledger.add_taste_genre(&user_id, &genre, 1.0).await?;
        }
        _ => {
            return Err(AppError::InvalidInput(format!(
                "unknown taste kind: {}",
                kind
            )))
        }
    }

    list(State(state), Path((user_id.to_string(), kind))).await
}

/// `DELETE /api/tastes/{user_id}/{target}`: removes one taste. The target
/// segment is routed by its catalog-id pattern; anything that is not a
/// catalog id is treated as a genre name.
pub async fn remove(
    State(state): State<AppState>,
    Path((user_id, target)): Path<(String, String)>,
) -> AppResult<Json<Value>> {
    let user_id = UserId::new(user_id);
    require_user(&state, &user_id).await?;

    match CatalogId::parse(&target) {
        Ok(CatalogId::Movie(movie_id)) => {
            state.ledger.remove_taste_movie(&user_id, &movie_id).await?;
        }
        Ok(CatalogId::Artist(artist_id)) => {
            state
                .ledger
                .remove_taste_artist(&user_id, &artist_id)
                .await?;
        }
        Err(_) => {
            state.ledger.remove_taste_genre(&user_id, &target).await?;
        }
    }

    Ok(envelope(json!({
        "userId": user_id,
        "removed": target,
    })))
}

async fn movie_tastes(state: &AppState, user: &User) -> AppResult<Vec<Value>> {
    let mut rows = Vec::with_capacity(user.taste_movies.len());
    for movie_id in &user.taste_movies {
        let movie = state
            .store
            .get_movie(movie_id)
            .await?
            .ok_or_else(|| AppError::Consistency(format!("movie {} not in store", movie_id)))?;
        let weight = edge_weight(state, user, TasteTarget::Movie(movie_id.clone())).await?;
        rows.push(json!({
            "idCatalog": movie_id,
            "originalTitle": movie.original_title,
            "poster": movie.poster,
            "weight": weight,
        }));
    }
    Ok(rows)
}

async fn artist_tastes(state: &AppState, user: &User) -> AppResult<Vec<Value>> {
    let mut rows = Vec::with_capacity(user.taste_artists.len());
    for artist_id in &user.taste_artists {
        let artist = state
            .store
            .get_artist(artist_id)
            .await?
            .ok_or_else(|| AppError::Consistency(format!("artist {} not in store", artist_id)))?;
        let weight = edge_weight(state, user, TasteTarget::Artist(artist_id.clone())).await?;
        rows.push(json!({
            "idCatalog": artist_id,
            "name": artist.name,
            "photo": artist.photo,
            "weight": weight,
        }));
    }
    Ok(rows)
}

async fn genre_tastes(state: &AppState, user: &User) -> AppResult<Vec<Value>> {
    let mut rows = Vec::with_capacity(user.taste_genres.len());
    for genre in &user.taste_genres {
        let weight = edge_weight(state, user, TasteTarget::Genre(*genre)).await?;
        rows.push(json!({
            "genre": genre,
            "weight": weight,
        }));
    }
    Ok(rows)
}

async fn edge_weight(state: &AppState, user: &User, target: TasteTarget) -> AppResult<f64> {
    let key = TasteKey::new(user.id.clone(), target);
    Ok(state
        .store
        .get_edge(&key)
        .await?
        .map(|edge| edge.weight)
        .unwrap_or(0.0))
}
