use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{Gender, TasteKey, TasteTarget, TvType, User, UserId};
use crate::state::AppState;

use super::envelope;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub user_birth_year: Option<i32>,
    #[serde(default)]
    pub user_gender: Option<String>,
}

/// `POST /api/subscribe`: creates the user record.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> AppResult<Json<Value>> {
    let user_id = UserId::new(request.user_id);

    if state.store.get_user(&user_id).await?.is_some() {
        return Err(AppError::InvalidInput(format!(
            "{} is already subscribed",
            user_id
        )));
    }

    let mut user = User::new(user_id.clone(), request.user_name);
    user.birth_year = request.user_birth_year;
    user.gender = match request.user_gender.as_deref() {
        Some(raw) => Some(parse_gender(raw)?),
        None => None,
    };
    state.store.put_user(&user).await?;

    tracing::info!(user = %user_id, "User subscribed");
    Ok(envelope(json!({
        "userId": user_id,
        "message": "User subscribed successful!",
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeRequest {
    pub user_id: String,
}

/// `POST /api/unsubscribe`: deletes the user and their taste edges.
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(request): Json<UnsubscribeRequest>,
) -> AppResult<Json<Value>> {
    let user_id = UserId::new(request.user_id);

    let user = state
        .store
        .get_user(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} is not subscribed", user_id)))?;

    for movie in &user.taste_movies {
        let key = TasteKey::new(user_id.clone(), TasteTarget::Movie(movie.clone()));
        state.store.delete_edge(&key).await?;
    }
    for artist in &user.taste_artists {
        let key = TasteKey::new(user_id.clone(), TasteTarget::Artist(artist.clone()));
        state.store.delete_edge(&key).await?;
    }
    for genre in &user.taste_genres {
        let key = TasteKey::new(user_id.clone(), TasteTarget::Genre(*genre));
        state.store.delete_edge(&key).await?;
    }
    state.store.delete_user(&user_id).await?;

    tracing::info!(user = %user_id, "User unsubscribed");
    Ok(envelope(json!({
        "userId": user_id,
        "message": "User unsubscribed successful!",
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvTypesRequest {
    pub tv_types: Vec<String>,
}

/// `POST /api/users/{user_id}/tvtypes`: replaces the tv-type filter list.
/// Unlike genre tastes, an unknown tv-type here is a user-facing mistake
/// and is rejected.
pub async fn set_tv_types(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<TvTypesRequest>,
) -> AppResult<Json<Value>> {
    let user_id = UserId::new(user_id);
    let mut user = require_user(&state, &user_id).await?;

    let mut parsed = Vec::with_capacity(request.tv_types.len());
    for raw in &request.tv_types {
        let tv_type: TvType = raw
            .parse()
            .map_err(|_| AppError::InvalidInput(format!("unknown tv type: {}", raw)))?;
        parsed.push(tv_type);
    }

    user.set_tv_types(parsed);
    state.store.put_user(&user).await?;

    Ok(envelope(json!({
        "userId": user_id,
        "tvTypes": user.tv_types,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatChoiceRequest {
    pub repeat_choice: bool,
}

/// `POST /api/users/{user_id}/repeat`: toggles re-suggesting watched
/// movies.
pub async fn set_repeat_choice(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<RepeatChoiceRequest>,
) -> AppResult<Json<Value>> {
    let user_id = UserId::new(user_id);
    let mut user = require_user(&state, &user_id).await?;

    user.repeat_choice = request.repeat_choice;
    state.store.put_user(&user).await?;

    Ok(envelope(json!({
        "userId": user_id,
        "repeatChoice": user.repeat_choice,
    })))
}

fn parse_gender(raw: &str) -> AppResult<Gender> {
    match raw {
        "M" | "m" => Ok(Gender::M),
        "F" | "f" => Ok(Gender::F),
        _ => Err(AppError::InvalidInput(format!("unknown gender: {}", raw))),
    }
}

pub(crate) async fn require_user(state: &AppState, user_id: &UserId) -> AppResult<User> {
    state
        .store
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} is not subscribed", user_id)))
}
