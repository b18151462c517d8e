use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::aptos::types::AptosBlock;
use crate::error::ApiError;
use crate::server::AppState;
use crate::translator::assemble_block;

/// `GET /v1/blocks/by_height/{height}` - one block in Aptos format.
///
/// The height is validated before any upstream call is made.
pub async fn block_by_height(
    State(state): State<Arc<AppState>>,
    Path(height): Path<String>,
) -> Result<Json<AptosBlock>, ApiError> {
    let height: u64 = height
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidHeight)?;

    let txs = state
        .initia
        .txs_by_height(height)
        .await
        .map_err(|e| ApiError::upstream(format!("Failed to fetch transactions at height {height}"), e))?;

    let block = state
        .initia
        .block_by_height(height)
        .await
        .map_err(|e| ApiError::upstream(format!("Failed to fetch block data at height {height}"), e))?;

    Ok(Json(assemble_block(&block, &txs)?))
}
