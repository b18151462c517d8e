//! Aptos-formatted response objects.
//!
//! These mirror the Aptos fullnode REST schema closely enough for standard
//! Aptos SDKs and indexers to consume them. Fields the source chain cannot
//! populate are fixed placeholders (empty strings, `"0"`, empty lists).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ledger head info served at `/v1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerInfo {
    pub chain_id: u16,
    pub epoch: String,
    pub ledger_version: String,
    pub oldest_ledger_version: String,
    pub ledger_timestamp: String,
    pub node_role: String,
    pub oldest_block_height: String,
    pub block_height: String,
}

/// One block in Aptos format: the synthesized metadata transaction first,
/// then the block's user transactions in source order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AptosBlock {
    pub block_height: String,
    pub block_hash: String,
    pub block_timestamp: String,
    pub first_version: String,
    pub last_version: String,
    pub transactions: Vec<TransactionResponse>,
}

/// Tagged transaction union, discriminated by the `type` field as in the
/// Aptos REST schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransactionResponse {
    #[serde(rename = "user_transaction")]
    User(UserTransaction),
    #[serde(rename = "block_metadata_transaction")]
    BlockMetadata(BlockMetadataTransaction),
    #[serde(rename = "block_epilogue_transaction")]
    BlockEpilogue(BlockEpilogueTransaction),
}

impl TransactionResponse {
    /// The ledger version string carried by any variant.
    pub fn version(&self) -> &str {
        match self {
            TransactionResponse::User(tx) => &tx.version,
            TransactionResponse::BlockMetadata(tx) => &tx.version,
            TransactionResponse::BlockEpilogue(tx) => &tx.version,
        }
    }

    /// The microsecond timestamp string carried by any variant.
    pub fn timestamp(&self) -> &str {
        match self {
            TransactionResponse::User(tx) => &tx.timestamp,
            TransactionResponse::BlockMetadata(tx) => &tx.timestamp,
            TransactionResponse::BlockEpilogue(tx) => &tx.timestamp,
        }
    }
}

/// A real transaction translated from the source chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTransaction {
    pub version: String,
    pub hash: String,
    pub state_change_hash: String,
    pub event_root_hash: String,
    pub state_checkpoint_hash: Option<String>,
    pub gas_used: String,
    pub success: bool,
    pub vm_status: String,
    pub accumulator_root_hash: String,
    pub changes: Vec<Value>,
    pub sender: String,
    pub sequence_number: String,
    pub max_gas_amount: String,
    pub gas_unit_price: String,
    pub expiration_timestamp_secs: String,
    pub payload: EntryFunctionPayload,
    pub events: Vec<MoveEvent>,
    pub timestamp: String,
}

/// Synthesized transaction opening every block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockMetadataTransaction {
    pub id: String,
    pub version: String,
    pub hash: String,
    pub state_change_hash: String,
    pub event_root_hash: String,
    pub state_checkpoint_hash: Option<String>,
    pub gas_used: String,
    pub success: bool,
    pub vm_status: String,
    pub accumulator_root_hash: String,
    pub changes: Vec<Value>,
    pub epoch: String,
    pub round: String,
    pub events: Vec<MoveEvent>,
    pub previous_block_votes_bitvec: Vec<u8>,
    pub proposer: String,
    pub failed_proposer_indices: Vec<u32>,
    pub timestamp: String,
}

/// Sentinel transaction for version slots past a block's real content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockEpilogueTransaction {
    pub version: String,
    pub hash: String,
    pub state_change_hash: String,
    pub event_root_hash: String,
    pub state_checkpoint_hash: Option<String>,
    pub gas_used: String,
    pub success: bool,
    pub vm_status: String,
    pub accumulator_root_hash: String,
    pub changes: Vec<Value>,
    pub timestamp: String,
    pub block_end_info: Option<Value>,
}

/// Entry-function payload of a user transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryFunctionPayload {
    #[serde(rename = "type")]
    pub payload_type: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl EntryFunctionPayload {
    /// Placeholder payload for transactions without an execute message.
    pub fn empty() -> Self {
        Self {
            payload_type: String::new(),
            function: "_::_::_".to_string(),
            type_arguments: Vec::new(),
            arguments: Vec::new(),
        }
    }
}

/// A Move event retained by the event filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: Value,
}

/// One module entry in account module listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveModuleBytecode {
    pub abi: Value,
    pub bytecode: String,
}

/// One resource entry in account resource listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResourceData {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub data: Value,
}
