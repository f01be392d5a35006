//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate model, history and source calls into caller-facing APIs.
//! - Keep callers independent of storage and caching details.

pub mod undo_service;
pub mod video_service;
