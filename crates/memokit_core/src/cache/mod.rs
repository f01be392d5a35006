//! Memoizing proxies over slow sources.
//!
//! # Responsibility
//! - Provide a keyed memo map with an explicit retention policy.
//! - Wrap video sources behind their own request contract.
//!
//! # Invariants
//! - The first successful result stored for a key stays canonical until it is
//!   invalidated or evicted.
//! - Source failures are never stored.

pub mod caching_source;
pub mod memo;
