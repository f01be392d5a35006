//! Caching proxy for video sources.
//!
//! # Responsibility
//! - Serve repeated `list_videos` / `get_video_info` requests from memory.
//! - Stay indistinguishable from the wrapped source for callers.
//!
//! # Invariants
//! - Failures from the wrapped source are returned unchanged, never stored,
//!   never retried.
//! - Identical requests racing on a cold key may both delegate; the first
//!   result stored wins and every later caller observes that value.
//! - The internal lock is never held while delegating.
//! - A fill that started before an `invalidate*` or `clear` call is returned
//!   to its caller but not stored, so invalidation is never undone by a
//!   request already in flight.

use crate::cache::memo::{CacheConfig, CacheConfigError, CacheStats, MemoCache};
use crate::model::video::{Video, VideoId};
use crate::repo::video_repo::{SourceResult, VideoSource};
use log::{debug, warn};
use std::sync::{Mutex, MutexGuard, PoisonError};

struct CacheState {
    list: Option<Vec<Video>>,
    by_id: MemoCache<VideoId, Option<Video>>,
    stats: CacheStats,
    /// Bumped by every invalidation; fills remember the value they started at.
    epoch: u64,
}

/// Memoizing wrapper implementing the same contract as its source.
pub struct CachingVideoSource<S> {
    inner: S,
    config: CacheConfig,
    state: Mutex<CacheState>,
}

impl<S: VideoSource> CachingVideoSource<S> {
    /// Wraps `inner` with an unbounded cache.
    pub fn new(inner: S) -> Self {
        Self::build(inner, CacheConfig::default(), MemoCache::unbounded())
    }

    /// Wraps `inner` with an explicit retention policy.
    ///
    /// # Errors
    /// - Returns `ZeroCapacity` when `max_entries == Some(0)`.
    pub fn with_config(inner: S, config: CacheConfig) -> Result<Self, CacheConfigError> {
        let by_id = MemoCache::new(config.max_entries)?;
        Ok(Self::build(inner, config, by_id))
    }

    fn build(inner: S, config: CacheConfig, by_id: MemoCache<VideoId, Option<Video>>) -> Self {
        Self {
            inner,
            config,
            state: Mutex::new(CacheState {
                list: None,
                by_id,
                stats: CacheStats::default(),
                epoch: 0,
            }),
        }
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    pub fn stats(&self) -> CacheStats {
        self.lock_state().stats
    }

    /// Number of memoized per-id answers (the list slot is not counted).
    pub fn cached_len(&self) -> usize {
        self.lock_state().by_id.len()
    }

    /// Drops the memoized answer for `id`; returns whether one existed.
    pub fn invalidate(&self, id: &VideoId) -> bool {
        let removed = {
            let mut state = self.lock_state();
            state.epoch += 1;
            state.by_id.remove(id)
        };
        debug!("event=cache_invalidate module=cache scope=id key={id} removed={removed}");
        removed
    }

    /// Drops the memoized list; returns whether one existed.
    pub fn invalidate_list(&self) -> bool {
        let removed = {
            let mut state = self.lock_state();
            state.epoch += 1;
            state.list.take().is_some()
        };
        debug!("event=cache_invalidate module=cache scope=list removed={removed}");
        removed
    }

    /// Drops every memoized answer. Counters are kept.
    pub fn clear(&self) {
        let mut state = self.lock_state();
        state.epoch += 1;
        state.list = None;
        state.by_id.clear();
        debug!("event=cache_invalidate module=cache scope=all");
    }

    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        // Every mutation is a single map operation; a poisoned state is intact.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: VideoSource> VideoSource for CachingVideoSource<S> {
    fn list_videos(&self) -> SourceResult<Vec<Video>> {
        let started_epoch = {
            let mut state = self.lock_state();
            if let Some(list) = state.list.clone() {
                state.stats.hits += 1;
                debug!("event=cache_lookup module=cache scope=list status=hit");
                return Ok(list);
            }
            state.stats.misses += 1;
            state.stats.source_calls += 1;
            state.epoch
        };
        debug!("event=cache_lookup module=cache scope=list status=miss");

        let fetched = self.inner.list_videos().inspect_err(|err| {
            warn!("event=cache_fill module=cache scope=list status=error error={err}");
        })?;

        let mut state = self.lock_state();
        if state.epoch != started_epoch {
            debug!("event=cache_fill module=cache scope=list status=dropped reason=invalidated");
            return Ok(fetched);
        }
        Ok(state.list.get_or_insert(fetched).clone())
    }

    fn get_video_info(&self, id: &VideoId) -> SourceResult<Option<Video>> {
        let started_epoch = {
            let mut state = self.lock_state();
            if let Some(cached) = state.by_id.get(id) {
                state.stats.hits += 1;
                debug!("event=cache_lookup module=cache scope=id key={id} status=hit");
                return Ok(cached);
            }
            state.stats.misses += 1;
            state.stats.source_calls += 1;
            state.epoch
        };
        debug!("event=cache_lookup module=cache scope=id key={id} status=miss");

        let fetched = self.inner.get_video_info(id).inspect_err(|err| {
            warn!("event=cache_fill module=cache scope=id key={id} status=error error={err}");
        })?;

        if fetched.is_none() && !self.config.cache_missing {
            return Ok(None);
        }

        let mut state = self.lock_state();
        if state.epoch != started_epoch {
            debug!("event=cache_fill module=cache scope=id key={id} status=dropped reason=invalidated");
            return Ok(fetched);
        }
        let outcome = state.by_id.insert_if_absent(id.clone(), fetched);
        if let Some(evicted) = outcome.evicted {
            state.stats.evictions += 1;
            debug!("event=cache_evict module=cache scope=id key={evicted} reason=capacity");
        }
        Ok(outcome.canonical)
    }
}
