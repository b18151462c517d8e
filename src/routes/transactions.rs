use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;

use crate::aptos::types::TransactionResponse;
use crate::error::ApiError;
use crate::server::AppState;
use crate::translator::{
    decode_version, to_block_epilogue_transaction, to_block_metadata_transaction,
    to_user_transaction,
};

/// `GET /v1/transactions/by_version/{version}` - resolve a flat ledger
/// version to a transaction.
///
/// Offset 0 resolves to the block-metadata pseudo-transaction; an offset
/// past the block's real transaction count resolves to an epilogue
/// sentinel, so the lookup is total over every block's version window.
pub async fn transaction_by_version(
    State(state): State<Arc<AppState>>,
    Path(version): Path<String>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let version: u64 = version
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidVersion)?;

    let (height, offset) = decode_version(version);
    if height < 1 {
        return Err(ApiError::InvalidVersion);
    }
    debug!("Resolving version {} -> height={}, offset={}", version, height, offset);

    if offset == 0 {
        let block = state
            .initia
            .block_by_height(height)
            .await
            .map_err(|e| ApiError::upstream(format!("Failed to fetch block at height {height}"), e))?;
        return Ok(Json(to_block_metadata_transaction(&block)?));
    }

    let txs = state
        .initia
        .txs_by_height(height)
        .await
        .map_err(|e| ApiError::upstream(format!("Failed to fetch transactions at height {height}"), e))?;

    if offset as usize > txs.len() {
        let block = state
            .initia
            .block_by_height(height)
            .await
            .map_err(|e| ApiError::upstream(format!("Failed to fetch block at height {height}"), e))?;
        return Ok(Json(to_block_epilogue_transaction(&block, version)?));
    }

    let index = offset as usize - 1;
    Ok(Json(to_user_transaction(&txs[index], version, index)?))
}
