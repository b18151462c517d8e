use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use tracing::debug;

use crate::aptos::types::LedgerInfo;
use crate::error::ApiError;
use crate::server::AppState;
use crate::translator::{encode_version, to_micro_timestamp};

/// `GET /v1` - current ledger head.
///
/// Always computed live; the response cache never covers this route. The
/// head version points one past the last real transaction of the latest
/// block: `encode_version(height, tx_count)`.
pub async fn ledger_info(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LedgerInfo>, ApiError> {
    let block = state
        .initia
        .latest_block()
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch latest block", e))?;

    let height: u64 = block
        .block
        .header
        .height
        .parse()
        .map_err(|e| ApiError::upstream("Invalid height in latest block header", e))?;

    let txs = state
        .initia
        .txs_by_height(height)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch latest block transactions", e))?;

    let ledger_version = encode_version(height, txs.len() as u64);
    debug!(
        "Ledger head: height={}, txs={}, version={}",
        height,
        txs.len(),
        ledger_version
    );

    let ledger_timestamp = to_micro_timestamp(&block.block.header.time)
        .map_err(|e| ApiError::upstream("Invalid timestamp in latest block header", e))?;

    Ok(Json(LedgerInfo {
        chain_id: state.config.chain_id,
        epoch: "1".to_string(),
        ledger_version: ledger_version.to_string(),
        oldest_ledger_version: "10000".to_string(),
        ledger_timestamp,
        node_role: "full_node".to_string(),
        oldest_block_height: "1".to_string(),
        block_height: height.to_string(),
    }))
}
