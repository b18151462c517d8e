//! Block-level synthesis.
//!
//! The Aptos format requires every block to open with a block-metadata
//! transaction, and by-version lookups must resolve for every slot inside a
//! block's version window. The source chain carries neither record, so both
//! are fabricated deterministically from the block header.

use crate::aptos::types::{
    AptosBlock, BlockEpilogueTransaction, BlockMetadataTransaction, TransactionResponse,
};
use crate::initia::types::{BlockResponse, TxResponse};

use super::codec::{to_micro_timestamp, ZERO_ADDRESS};
use super::tx::to_user_transaction;
use super::version::{encode_version, BLOCK_STRIDE};
use super::TranslateError;

fn parse_height(raw: &str) -> Result<u64, TranslateError> {
    raw.parse().map_err(|source| TranslateError::Height {
        raw: raw.to_string(),
        source,
    })
}

fn block_timestamp(block: &BlockResponse) -> Result<String, TranslateError> {
    to_micro_timestamp(&block.block.header.time).map_err(|source| TranslateError::Timestamp {
        raw: block.block.header.time.clone(),
        source,
    })
}

/// Fabricate the block-metadata transaction for a block header.
///
/// Proposer identity, epoch and round are not modeled on the source chain
/// and are fixed placeholders.
pub fn to_block_metadata_transaction(
    block: &BlockResponse,
) -> Result<TransactionResponse, TranslateError> {
    let height = parse_height(&block.block.header.height)?;

    Ok(TransactionResponse::BlockMetadata(BlockMetadataTransaction {
        id: block.block_id.hash.clone(),
        version: encode_version(height, 0).to_string(),
        hash: block.block_id.hash.clone(),
        state_change_hash: String::new(),
        event_root_hash: String::new(),
        state_checkpoint_hash: None,
        gas_used: "0".to_string(),
        success: true,
        vm_status: String::new(),
        accumulator_root_hash: String::new(),
        changes: Vec::new(),
        epoch: "0".to_string(),
        round: "0".to_string(),
        events: Vec::new(),
        previous_block_votes_bitvec: Vec::new(),
        proposer: ZERO_ADDRESS.to_string(),
        failed_proposer_indices: Vec::new(),
        timestamp: block_timestamp(block)?,
    }))
}

/// Fabricate the epilogue sentinel for a version slot past the block's real
/// transactions. The requested version is echoed back verbatim so callers
/// iterating a version range see the slot as resolved but empty.
pub fn to_block_epilogue_transaction(
    block: &BlockResponse,
    version: u64,
) -> Result<TransactionResponse, TranslateError> {
    Ok(TransactionResponse::BlockEpilogue(BlockEpilogueTransaction {
        version: version.to_string(),
        hash: block.block.header.data_hash.clone(),
        state_change_hash: String::new(),
        event_root_hash: String::new(),
        state_checkpoint_hash: None,
        gas_used: "0".to_string(),
        success: false,
        vm_status: String::new(),
        accumulator_root_hash: String::new(),
        changes: Vec::new(),
        timestamp: block_timestamp(block)?,
        block_end_info: None,
    }))
}

/// Assemble a full Aptos block: metadata transaction first, then every
/// source transaction with versions `encode_version(height, i + 1)`.
pub fn assemble_block(
    block: &BlockResponse,
    txs: &[TxResponse],
) -> Result<AptosBlock, TranslateError> {
    let height = parse_height(&block.block.header.height)?;

    // Offset 0 is taken by the metadata slot, so a block can hold at most
    // BLOCK_STRIDE - 1 real transactions before its window would bleed into
    // the next height. Refuse to fabricate colliding versions.
    if txs.len() as u64 >= BLOCK_STRIDE {
        return Err(TranslateError::VersionSpaceOverflow {
            height,
            count: txs.len(),
        });
    }

    let metadata = to_block_metadata_transaction(block)?;

    let mut transactions = Vec::with_capacity(txs.len() + 1);
    transactions.push(metadata);
    for (i, tx) in txs.iter().enumerate() {
        transactions.push(to_user_transaction(
            tx,
            encode_version(height, i as u64 + 1),
            i,
        )?);
    }

    let first_version = transactions[0].version().to_string();
    let last_version = transactions[transactions.len() - 1].version().to_string();
    let block_timestamp = transactions[0].timestamp().to_string();

    Ok(AptosBlock {
        block_height: height.to_string(),
        block_hash: block.block_id.hash.clone(),
        block_timestamp,
        first_version,
        last_version,
        transactions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initia::types::{Block, BlockHeader, BlockId, Tx, TxBody};
    use serde_json::json;

    fn sample_block(height: &str) -> BlockResponse {
        BlockResponse {
            block_id: BlockId {
                hash: format!("mock-block-hash-{height}"),
            },
            block: Block {
                header: BlockHeader {
                    chain_id: "test-chain".to_string(),
                    height: height.to_string(),
                    time: "2023-01-01T12:00:00.000Z".to_string(),
                    data_hash: format!("mock-data-hash-{height}"),
                    proposer_address: "init1proposer".to_string(),
                },
            },
        }
    }

    fn sample_tx(hash: &str) -> TxResponse {
        TxResponse {
            height: "123".to_string(),
            txhash: hash.to_string(),
            timestamp: "2023-01-01T12:00:00.000Z".to_string(),
            code: 0,
            gas_wanted: "2000".to_string(),
            gas_used: "1000".to_string(),
            tx: Tx {
                body: TxBody {
                    messages: vec![json!({ "sender": "init1YW5lcg==" })],
                },
            },
            events: Vec::new(),
        }
    }

    #[test]
    fn test_metadata_transaction_fields() {
        let meta = to_block_metadata_transaction(&sample_block("123")).unwrap();
        let TransactionResponse::BlockMetadata(meta) = meta else {
            panic!("expected block metadata transaction");
        };

        assert_eq!(meta.version, "1230000");
        assert_eq!(meta.hash, "mock-block-hash-123");
        assert_eq!(meta.id, "mock-block-hash-123");
        assert_eq!(meta.timestamp, "1672574400000000");
        assert_eq!(meta.proposer, "0x0");
        assert_eq!(meta.epoch, "0");
        assert_eq!(meta.round, "0");
        assert_eq!(meta.gas_used, "0");
        assert!(meta.success);
        assert!(meta.events.is_empty());
        assert!(meta.changes.is_empty());
    }

    #[test]
    fn test_epilogue_transaction_fields() {
        let epilogue = to_block_epilogue_transaction(&sample_block("123"), 1_230_005).unwrap();
        let TransactionResponse::BlockEpilogue(epilogue) = epilogue else {
            panic!("expected block epilogue transaction");
        };

        assert_eq!(epilogue.version, "1230005");
        assert_eq!(epilogue.hash, "mock-data-hash-123");
        assert_eq!(epilogue.timestamp, "1672574400000000");
        assert!(!epilogue.success);
        assert_eq!(epilogue.gas_used, "0");
        assert_eq!(epilogue.block_end_info, None);
    }

    #[test]
    fn test_assembled_block_opens_with_metadata() {
        let block = sample_block("123");
        let txs = vec![sample_tx("mock-tx-hash-1"), sample_tx("mock-tx-hash-2")];

        let assembled = assemble_block(&block, &txs).unwrap();
        assert_eq!(assembled.block_height, "123");
        assert_eq!(assembled.block_hash, "mock-block-hash-123");
        assert_eq!(assembled.transactions.len(), 3);
        assert!(matches!(
            assembled.transactions[0],
            TransactionResponse::BlockMetadata(_)
        ));
        assert_eq!(assembled.first_version, "1230000");
        assert_eq!(assembled.last_version, "1230002");
        assert_eq!(assembled.block_timestamp, "1672574400000000");
        assert_eq!(assembled.transactions[1].version(), "1230001");
        assert_eq!(assembled.transactions[2].version(), "1230002");
    }

    #[test]
    fn test_empty_block_is_just_metadata() {
        let assembled = assemble_block(&sample_block("42"), &[]).unwrap();
        assert_eq!(assembled.transactions.len(), 1);
        assert_eq!(assembled.first_version, "420000");
        assert_eq!(assembled.last_version, "420000");
    }

    #[test]
    fn test_overfull_block_is_rejected() {
        let txs = vec![sample_tx("h"); BLOCK_STRIDE as usize];
        let err = assemble_block(&sample_block("123"), &txs).unwrap_err();
        assert!(matches!(err, TranslateError::VersionSpaceOverflow { .. }));
    }
}
