//! Video catalog use-case service.
//!
//! Storage-agnostic: works the same over a raw source or a caching proxy.

use crate::model::video::{Video, VideoId};
use crate::repo::video_repo::{SourceResult, VideoSource};

pub struct VideoService<S: VideoSource> {
    source: S,
}

impl<S: VideoSource> VideoService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn list_videos(&self) -> SourceResult<Vec<Video>> {
        self.source.list_videos()
    }

    /// Looks up one video from raw user input.
    ///
    /// Invalid ids fail with `SourceError::Validation` before reaching the source.
    pub fn get_video(&self, raw_id: &str) -> SourceResult<Option<Video>> {
        let id = VideoId::parse(raw_id)?;
        self.source.get_video_info(&id)
    }

    /// Sum of durations over the listed catalog.
    pub fn total_duration_secs(&self) -> SourceResult<u64> {
        Ok(self
            .list_videos()?
            .iter()
            .map(|video| u64::from(video.duration_secs))
            .sum())
    }
}
