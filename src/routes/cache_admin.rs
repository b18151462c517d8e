//! Cache administration routes, mounted only when the response cache is
//! enabled.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct ClearQuery {
    pub target: Option<String>,
}

/// `GET /cache/stats` - hit/miss counters and entry count.
pub async fn stats(State(state): State<Arc<AppState>>) -> Response {
    match &state.cache {
        Some(cache) => Json(cache.stats()).into_response(),
        None => super::fallback().await.into_response(),
    }
}

/// `GET /cache/index` - every cached key.
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    match &state.cache {
        Some(cache) => Json(cache.keys()).into_response(),
        None => super::fallback().await.into_response(),
    }
}

/// `DELETE /cache` - drop everything, or only keys containing `?target=`.
pub async fn clear(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClearQuery>,
) -> Response {
    let Some(cache) = &state.cache else {
        return super::fallback().await.into_response();
    };

    let cleared = match &query.target {
        Some(target) => cache.clear_target(target),
        None => cache.clear(),
    };
    info!("Cache clear: {} entries dropped (target {:?})", cleared, query.target);

    Json(json!({ "cleared": cleared })).into_response()
}
