//! Wire types for the Initia REST API.
//!
//! Only the fields the gateway reads are modeled; everything else the
//! upstream returns is ignored during deserialization. Message bodies and
//! Move ABI/resource payloads stay as opaque JSON at this boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of `GET /cosmos/base/tendermint/v1beta1/blocks/{height}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockResponse {
    pub block_id: BlockId,
    pub block: Block,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockId {
    pub hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockHeader {
    #[serde(default)]
    pub chain_id: String,
    pub height: String,
    pub time: String,
    #[serde(default)]
    pub data_hash: String,
    #[serde(default)]
    pub proposer_address: String,
}

/// Response of `GET /cosmos/tx/v1beta1/txs`.
#[derive(Debug, Deserialize)]
pub struct TxSearchResponse {
    #[serde(default)]
    pub tx_responses: Vec<TxResponse>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// One executed transaction as reported by the tx service.
#[derive(Debug, Clone, Deserialize)]
pub struct TxResponse {
    pub height: String,
    pub txhash: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub gas_wanted: String,
    #[serde(default)]
    pub gas_used: String,
    #[serde(default)]
    pub tx: Tx,
    #[serde(default)]
    pub events: Vec<AbciEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tx {
    #[serde(default)]
    pub body: TxBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxBody {
    #[serde(default)]
    pub messages: Vec<Value>,
}

/// One ABCI event attached to a transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct AbciEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub attributes: Vec<EventAttribute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventAttribute {
    pub key: String,
    pub value: String,
}

/// Cursor-style pagination block shared by the list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub next_key: Option<String>,
    #[serde(default)]
    pub total: String,
}

/// Response of `GET /initia/move/v1/accounts/{address}/modules`.
#[derive(Debug, Deserialize)]
pub struct ModulesResponse {
    #[serde(default)]
    pub modules: Vec<MoveModule>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Response of `GET /initia/move/v1/accounts/{address}/modules/{name}`.
#[derive(Debug, Deserialize)]
pub struct ModuleResponse {
    pub module: MoveModule,
}

/// One published Move module. `abi` is a JSON document in string form.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveModule {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub module_name: String,
    pub abi: String,
    pub raw_bytes: String,
}

/// Response of `GET /initia/move/v1/accounts/{address}/resources`.
#[derive(Debug, Deserialize)]
pub struct ResourcesResponse {
    #[serde(default)]
    pub resources: Vec<MoveResource>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Response of the single-resource lookup.
#[derive(Debug, Deserialize)]
pub struct ResourceResponse {
    pub resource: MoveResource,
}

/// One Move resource. `move_resource` is a JSON document in string form.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveResource {
    #[serde(default)]
    pub address: String,
    pub struct_tag: String,
    pub move_resource: String,
    #[serde(default)]
    pub raw_bytes: String,
}

/// Request body of `POST /initia/move/v1/view/json`.
#[derive(Debug, Serialize)]
pub struct ViewRequest {
    pub address: String,
    pub module_name: String,
    pub function_name: String,
    pub type_args: Vec<String>,
    pub args: Vec<String>,
}

/// Response of the view call. `data` is the result as a JSON string.
#[derive(Debug, Deserialize)]
pub struct ViewResponse {
    pub data: String,
    #[serde(default)]
    pub gas_used: String,
}
