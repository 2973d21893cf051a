use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::{make_span_with_request_id, request_id_middleware};
use crate::state::AppState;

pub mod proposal;
pub mod schedule;
pub mod tasks;
pub mod tastes;
pub mod users;
pub mod watched;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/schedule/:tv_type/:day", get(schedule::schedule))
        .route("/api/subscribe", post(users::subscribe))
        .route("/api/unsubscribe", post(users::unsubscribe))
        .route("/api/users/:user_id/tvtypes", post(users::set_tv_types))
        .route("/api/users/:user_id/repeat", post(users::set_repeat_choice))
        .route(
            "/api/tastes/:user_id/:kind",
            get(tastes::list).post(tastes::add).delete(tastes::remove),
        )
        .route(
            "/api/watched/:user_id",
            get(watched::list).post(watched::add),
        )
        .route("/api/proposal/:user_id", get(proposal::proposal))
        .route("/task/suggest", get(tasks::suggest))
        .route("/task/retrieve", get(tasks::retrieve))
        // The id middleware must wrap the trace layer so the span factory
        // sees the extension it inserts.
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "stasera: plop down on the couch and enjoy a movie"
}

async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Success envelope shared by the JSON endpoints.
pub(crate) fn envelope(data: Value) -> Json<Value> {
    Json(json!({ "code": 0, "data": data }))
}
