//! Domain model for undo snapshots and the video catalog.
//!
//! # Responsibility
//! - Define the editor subject and the immutable snapshots it produces.
//! - Define the catalog records served by video sources.
//!
//! # Invariants
//! - Snapshot item data is readable only by the editor that restores it.
//! - Every video is identified by a validated `VideoId`.

pub mod editor;
pub mod snapshot;
pub mod video;
