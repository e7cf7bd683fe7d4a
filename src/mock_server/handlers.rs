//! Generic entity endpoint handlers.
//!
//! One set of handlers serves every entity: records are opaque, so the
//! endpoint segment of the path is all a handler needs to pick its table.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::query::QueryBody;
use crate::record::Record;

type Shared = Arc<RwLock<MockState>>;

fn not_found(entity: &str, id: i64) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "message": format!("No {} found with id: {}", entity, id)
        })),
    )
        .into_response()
}

/// POST /{entity}
pub async fn create_record(
    State(state): State<Shared>,
    Path(entity): Path<String>,
    Json(record): Json<Record>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    let created = state.insert(&entity, record);
    (StatusCode::CREATED, Json(json!({ "item": created }))).into_response()
}

/// GET /{entity}/{id}
pub async fn get_record(
    State(state): State<Shared>,
    Path((entity, id)): Path<(String, i64)>,
) -> impl IntoResponse {
    let state = state.read().await;
    match state.get(&entity, id) {
        Some(record) => (StatusCode::OK, Json(json!({ "item": record }))).into_response(),
        None => not_found(&entity, id),
    }
}

/// PUT /{entity}/{id}
pub async fn update_record(
    State(state): State<Shared>,
    Path((entity, id)): Path<(String, i64)>,
    Json(record): Json<Record>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    match state.replace(&entity, id, record) {
        Some(stored) => (StatusCode::OK, Json(json!({ "item": stored }))).into_response(),
        None => not_found(&entity, id),
    }
}

/// PATCH /{entity}/{id}
pub async fn patch_record(
    State(state): State<Shared>,
    Path((entity, id)): Path<(String, i64)>,
    Json(partial): Json<Record>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    match state.merge(&entity, id, partial) {
        Some(stored) => (StatusCode::OK, Json(json!({ "item": stored }))).into_response(),
        None => not_found(&entity, id),
    }
}

/// DELETE /{entity}/{id}
pub async fn delete_record(
    State(state): State<Shared>,
    Path((entity, id)): Path<(String, i64)>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    if state.remove(&entity, id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found(&entity, id)
    }
}

/// POST /{entity}/query
pub async fn query_records(
    State(state): State<Shared>,
    Path(entity): Path<String>,
    Json(body): Json<QueryBody>,
) -> impl IntoResponse {
    let state = state.read().await;
    let items = state.query(&entity, &body);
    (StatusCode::OK, Json(json!({ "items": items }))).into_response()
}
