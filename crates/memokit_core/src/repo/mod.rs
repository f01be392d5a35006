//! Video source contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the request contract shared by real sources and caching proxies.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Write paths call `Video::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.

pub mod video_repo;
