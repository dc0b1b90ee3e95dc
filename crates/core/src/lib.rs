//! vyscan-core
//!
//! Core library for triaging Vyper contracts that may be exposed to the
//! compiler's broken reentrancy lock.
//!
//! The heart of the crate is [`matcher`], a pure lexical classifier over source
//! text. Everything else feeds it: export lists in, verified sources fetched from
//! Etherscan-compatible explorers (or reused from the cache), and a cache
//! directory that ends up holding only the contracts worth a manual audit.

pub mod cache;
pub mod matcher;
pub mod model;
pub mod records;
pub mod services;
pub mod workspace;

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
