//! HTTP route handlers. Each file covers one endpoint class; handlers fetch
//! through the injected Initia client, run the pure translators, and
//! serialize Aptos-shaped JSON.

pub mod accounts;
pub mod blocks;
pub mod cache_admin;
pub mod ledger;
pub mod transactions;
pub mod view;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::server::AppState;

/// `GET /` - capability listing.
pub async fn welcome(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "message": "Welcome to the Initia to Aptos Bridge API",
        "endpoints": {
            "nodeInfo": "/v1",
            "blockByHeight": "/v1/blocks/by_height/:height",
            "transactionByVersion": "/v1/transactions/by_version/:version",
            "accountModules": "/v1/accounts/:address/modules",
            "accountResources": "/v1/accounts/:address/resources",
            "viewFunction": "/v1/view",
        },
        "config": {
            "endpoint": state.config.endpoint,
            "chain_id": state.config.chain_id,
            "cache_enabled": state.config.cache_enabled,
        },
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Fallback for every unmatched route.
pub async fn fallback() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status": "error",
            "error_code": "not_supported",
            "message": "Not supported",
        })),
    )
}
