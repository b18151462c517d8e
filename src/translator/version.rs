//! Bidirectional mapping between Initia (block height, in-block offset)
//! addressing and the flat Aptos ledger version numbering.
//!
//! Every block owns a contiguous window of `BLOCK_STRIDE` versions. Offset 0
//! is reserved for the synthesized block-metadata transaction, offsets
//! `1..=N` address the block's real transactions in listing order, and any
//! remaining offsets act as epilogue sentinels for by-version lookups.

/// Version slots reserved per block. Bounds a block to `BLOCK_STRIDE - 1`
/// real transactions before its window would collide with the next height.
pub const BLOCK_STRIDE: u64 = 10_000;

/// Map a block height and in-block offset to a flat ledger version.
pub fn encode_version(height: u64, offset: u64) -> u64 {
    height * BLOCK_STRIDE + offset
}

/// Split a flat ledger version back into (height, offset).
pub fn decode_version(version: u64) -> (u64, u64) {
    (version / BLOCK_STRIDE, version % BLOCK_STRIDE)
}
