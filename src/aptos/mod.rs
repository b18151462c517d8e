pub mod types;

pub use types::{
    AptosBlock, BlockEpilogueTransaction, BlockMetadataTransaction, EntryFunctionPayload,
    LedgerInfo, MoveEvent, MoveModuleBytecode, MoveResourceData, TransactionResponse,
    UserTransaction,
};
