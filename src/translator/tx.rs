//! User-transaction translation.
//!
//! Converts one executed source transaction, together with its assigned
//! ledger version and 0-based in-block index, into an Aptos
//! `user_transaction` response.

use tracing::warn;

use crate::aptos::types::{EntryFunctionPayload, TransactionResponse, UserTransaction};
use crate::initia::types::TxResponse;

use super::codec::{to_aptos_address, to_micro_timestamp, ZERO_ADDRESS};
use super::event::map_events;
use super::message::MessageKind;
use super::TranslateError;

/// Translate one source transaction into a user transaction.
///
/// `sequence` is the transaction's 0-based position inside its block; it
/// stands in for the account-level nonce the source chain does not expose.
/// Execution outcome is likewise not surfaced: `success` is always true.
pub fn to_user_transaction(
    tx: &TxResponse,
    version: u64,
    sequence: usize,
) -> Result<TransactionResponse, TranslateError> {
    let timestamp = to_micro_timestamp(&tx.timestamp).map_err(|source| {
        TranslateError::Timestamp {
            raw: tx.timestamp.clone(),
            source,
        }
    })?;

    let messages: Vec<MessageKind> = tx
        .tx
        .body
        .messages
        .iter()
        .map(MessageKind::classify)
        .collect();

    Ok(TransactionResponse::User(UserTransaction {
        version: version.to_string(),
        hash: tx.txhash.clone(),
        state_change_hash: String::new(),
        event_root_hash: String::new(),
        state_checkpoint_hash: None,
        gas_used: tx.gas_used.clone(),
        success: true,
        vm_status: String::new(),
        accumulator_root_hash: String::new(),
        changes: Vec::new(),
        sender: resolve_sender(&messages, &tx.txhash),
        sequence_number: sequence.to_string(),
        max_gas_amount: tx.gas_wanted.clone(),
        gas_unit_price: "0".to_string(),
        expiration_timestamp_secs: "0".to_string(),
        payload: resolve_payload(&messages),
        events: map_events(&tx.events),
        timestamp,
    }))
}

/// Decode the first sender-carrying message. Transactions without one, and
/// senders that fail to decode, fall back to the zero address.
fn resolve_sender(messages: &[MessageKind], txhash: &str) -> String {
    let Some(sender) = messages.iter().find_map(MessageKind::sender) else {
        return ZERO_ADDRESS.to_string();
    };

    match to_aptos_address(sender) {
        Ok(address) => address,
        Err(err) => {
            warn!("Undecodable sender '{}' in tx {}: {}", sender, txhash, err);
            ZERO_ADDRESS.to_string()
        }
    }
}

/// Build the entry-function payload. Every execute-shaped message overwrites
/// the previous one, so the last match in iteration order wins.
fn resolve_payload(messages: &[MessageKind]) -> EntryFunctionPayload {
    let mut payload = EntryFunctionPayload::empty();

    for message in messages {
        if let MessageKind::Execute {
            module_address,
            module_name,
            function_name,
            type_args,
            args,
            ..
        } = message
        {
            payload = EntryFunctionPayload {
                payload_type: "entry_function_payload".to_string(),
                function: format!("{module_address}::{module_name}::{function_name}"),
                type_arguments: type_args.clone(),
                arguments: args.clone(),
            };
        }
    }

    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initia::types::{AbciEvent, EventAttribute, Tx, TxBody};
    use serde_json::json;

    fn sample_tx() -> TxResponse {
        TxResponse {
            height: "123".to_string(),
            txhash: "mock-tx-hash-1".to_string(),
            timestamp: "2023-01-01T12:00:00.000Z".to_string(),
            code: 0,
            gas_wanted: "2000".to_string(),
            gas_used: "1000".to_string(),
            tx: Tx {
                body: TxBody {
                    messages: vec![json!({ "sender": "init1YW5lcg==" })],
                },
            },
            events: vec![AbciEvent {
                event_type: "move".to_string(),
                attributes: vec![
                    EventAttribute {
                        key: "type_tag".to_string(),
                        value: "0x1::coin::Transfer".to_string(),
                    },
                    EventAttribute {
                        key: "data".to_string(),
                        value: r#"{"amount":"100"}"#.to_string(),
                    },
                ],
            }],
        }
    }

    fn as_user(tx: TransactionResponse) -> UserTransaction {
        match tx {
            TransactionResponse::User(user) => user,
            other => panic!("expected user transaction, got {other:?}"),
        }
    }

    #[test]
    fn test_basic_field_mapping() {
        let user = as_user(to_user_transaction(&sample_tx(), 1_230_001, 0).unwrap());

        assert_eq!(user.version, "1230001");
        assert_eq!(user.hash, "mock-tx-hash-1");
        assert_eq!(user.timestamp, "1672574400000000");
        assert!(user.success);
        assert_eq!(user.sender, "0x616e6572");
        assert_eq!(user.sequence_number, "0");
        assert_eq!(user.gas_used, "1000");
        assert_eq!(user.max_gas_amount, "2000");
        assert_eq!(user.gas_unit_price, "0");
        assert_eq!(user.expiration_timestamp_secs, "0");
        assert_eq!(user.state_checkpoint_hash, None);
        assert!(user.changes.is_empty());
        assert_eq!(user.events.len(), 1);
        assert_eq!(user.events[0].event_type, "0x1::coin::Transfer");
    }

    #[test]
    fn test_default_payload_without_execute_message() {
        let user = as_user(to_user_transaction(&sample_tx(), 1_230_001, 0).unwrap());
        assert_eq!(user.payload.payload_type, "");
        assert_eq!(user.payload.function, "_::_::_");
        assert!(user.payload.type_arguments.is_empty());
        assert!(user.payload.arguments.is_empty());
    }

    #[test]
    fn test_last_execute_message_wins() {
        let mut tx = sample_tx();
        tx.tx.body.messages = vec![
            json!({
                "sender": "init1YW5lcg==",
                "module_address": "0x1",
                "module_name": "coin",
                "function_name": "transfer",
                "type_args": [],
                "args": []
            }),
            json!({
                "sender": "init1YW5lcg==",
                "module_address": "0x2",
                "module_name": "dex",
                "function_name": "swap",
                "type_args": ["0x1::native_uinit::Coin"],
                "args": ["AQ=="]
            }),
        ];

        let user = as_user(to_user_transaction(&tx, 1_230_001, 0).unwrap());
        assert_eq!(user.payload.payload_type, "entry_function_payload");
        assert_eq!(user.payload.function, "0x2::dex::swap");
        assert_eq!(user.payload.type_arguments, vec!["0x1::native_uinit::Coin"]);
        assert_eq!(user.payload.arguments, vec![json!("AQ==")]);
    }

    #[test]
    fn test_senderless_transaction_uses_zero_address() {
        let mut tx = sample_tx();
        tx.tx.body.messages = vec![json!({ "proposal_id": "7" })];
        let user = as_user(to_user_transaction(&tx, 1_230_001, 0).unwrap());
        assert_eq!(user.sender, "0x0");
    }

    #[test]
    fn test_undecodable_sender_falls_back_to_zero_address() {
        let mut tx = sample_tx();
        tx.tx.body.messages = vec![json!({ "sender": "init1***" })];
        let user = as_user(to_user_transaction(&tx, 1_230_001, 0).unwrap());
        assert_eq!(user.sender, "0x0");
    }

    #[test]
    fn test_first_sender_carrying_message_wins() {
        let mut tx = sample_tx();
        tx.tx.body.messages = vec![
            json!({ "proposal_id": "7" }),
            // "YQ==" decodes to "a".
            json!({ "sender": "init1YQ==" }),
            json!({ "sender": "init1YW5lcg==" }),
        ];
        let user = as_user(to_user_transaction(&tx, 1_230_001, 0).unwrap());
        assert_eq!(user.sender, "0x61");
    }

    #[test]
    fn test_bad_timestamp_is_an_error() {
        let mut tx = sample_tx();
        tx.timestamp = "yesterday".to_string();
        assert!(to_user_transaction(&tx, 1_230_001, 0).is_err());
    }
}
