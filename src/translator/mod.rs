//! The pure translation core: version addressing, codecs, message
//! classification, and the transaction/block renderers. Everything here is
//! synchronous and stateless.

pub mod block;
pub mod codec;
pub mod event;
pub mod message;
pub mod tx;
pub mod version;

use std::num::ParseIntError;

use thiserror::Error;

pub use block::{assemble_block, to_block_epilogue_transaction, to_block_metadata_transaction};
pub use codec::{to_aptos_address, to_micro_timestamp, AddressDecodeError, ZERO_ADDRESS};
pub use event::map_events;
pub use message::MessageKind;
pub use tx::to_user_transaction;
pub use version::{decode_version, encode_version, BLOCK_STRIDE};

/// Failure to render upstream chain data in the target format.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("invalid block height '{raw}': {source}")]
    Height {
        raw: String,
        source: ParseIntError,
    },
    #[error("invalid timestamp '{raw}': {source}")]
    Timestamp {
        raw: String,
        source: chrono::ParseError,
    },
    #[error("block {height} reports {count} transactions, exhausting its per-block version window")]
    VersionSpaceOverflow { height: u64, count: usize },
}
