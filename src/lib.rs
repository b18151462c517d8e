//! Initia to Aptos REST Translation Gateway
//!
//! This crate implements an HTTP gateway that serves an Aptos-compatible
//! REST API backed by an Initia (Cosmos-SDK, MoveVM) chain. Aptos tooling
//! addresses the ledger through flat, monotonically increasing versions;
//! the gateway maps those onto the source chain's (block height, in-block
//! index) addressing and synthesizes the per-block metadata and epilogue
//! pseudo-transactions the Aptos format requires.
//!
//! # Architecture
//!
//! ```text
//! Aptos tooling (SDKs, wallets, indexers)
//!     |
//!     | Aptos REST calls (/v1/...)
//!     v
//! Bridge gateway (this crate)
//!     |
//!     | Cosmos / Initia REST calls
//!     v
//! Initia network
//! ```
//!
//! Every block owns a window of 10000 ledger versions: offset 0 is the
//! synthesized block-metadata transaction, offsets 1..=N the block's real
//! transactions in listing order, and higher offsets resolve to epilogue
//! sentinels so by-version lookups stay total.
//!
//! # Modules
//!
//! - `config` - Environment and configuration management
//! - `server` - Router assembly and startup
//! - `routes` - Individual endpoint handlers
//! - `translator` - The pure Initia-to-Aptos translation core
//! - `initia` - Initia REST client wrapper
//! - `aptos` - Aptos-formatted response types
//! - `cache` - Optional TTL response cache
//! - `error` - Request error taxonomy

pub mod aptos;
pub mod cache;
pub mod config;
pub mod error;
pub mod initia;
pub mod routes;
pub mod server;
pub mod translator;
