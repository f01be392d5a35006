//! Core library for memokit: snapshot-based undo and memoizing source proxies.

pub mod cache;
pub mod db;
pub mod history;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use cache::caching_source::CachingVideoSource;
pub use cache::memo::{CacheConfig, CacheConfigError, CacheStats, MemoCache};
pub use history::{History, HistoryError};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::editor::Editor;
pub use model::snapshot::{Snapshot, SnapshotId, SnapshotMeta};
pub use model::video::{Video, VideoId, VideoValidationError};
pub use repo::video_repo::{SourceError, SourceResult, SqliteVideoSource, VideoSource};
pub use service::undo_service::{SnapshotHandle, UndoSession};
pub use service::video_service::VideoService;

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
