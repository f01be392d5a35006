use memokit_core::{
    CacheConfig, CachingVideoSource, SourceError, SourceResult, Video, VideoId, VideoService,
    VideoSource,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

/// Source whose answer embeds how many times it has been called.
#[derive(Default)]
struct CountingSource {
    calls: AtomicU32,
    delay: Option<Duration>,
}

impl CountingSource {
    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) -> u32 {
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        self.calls.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl VideoSource for CountingSource {
    fn list_videos(&self) -> SourceResult<Vec<Video>> {
        let call = self.tick();
        Ok(vec![Video::new(
            VideoId::parse("list").expect("valid id"),
            format!("V{call}"),
        )])
    }

    fn get_video_info(&self, id: &VideoId) -> SourceResult<Option<Video>> {
        let call = self.tick();
        Ok(Some(Video::new(id.clone(), format!("V{call}"))))
    }
}

fn id(raw: &str) -> VideoId {
    VideoId::parse(raw).expect("valid id")
}

#[test]
fn fetch_by_id_twice_hits_source_once() {
    let cache = CachingVideoSource::new(CountingSource::default());

    let first = cache.get_video_info(&id("42")).unwrap().expect("present");
    let second = cache.get_video_info(&id("42")).unwrap().expect("present");

    assert_eq!(first.title, "V1");
    assert_eq!(first, second);
    assert_eq!(cache.inner().calls(), 1);

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.source_calls, 1);
}

#[test]
fn distinct_ids_are_memoized_separately() {
    let cache = CachingVideoSource::new(CountingSource::default());
    cache.get_video_info(&id("a")).unwrap();
    cache.get_video_info(&id("b")).unwrap();
    cache.get_video_info(&id("a")).unwrap();

    assert_eq!(cache.inner().calls(), 2);
    assert_eq!(cache.cached_len(), 2);
}

#[test]
fn list_is_memoized_independently_from_ids() {
    let cache = CachingVideoSource::new(CountingSource::default());
    let first = cache.list_videos().unwrap();
    cache.get_video_info(&id("x")).unwrap();
    let second = cache.list_videos().unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].title, "V1");
    assert_eq!(cache.inner().calls(), 2);
}

#[test]
fn clear_drops_every_entry_but_keeps_counters() {
    let cache = CachingVideoSource::new(CountingSource::default());
    cache.list_videos().unwrap();
    cache.get_video_info(&id("x")).unwrap();

    cache.clear();
    assert_eq!(cache.cached_len(), 0);
    assert_eq!(cache.stats().misses, 2);

    let refetched = cache.get_video_info(&id("x")).unwrap().expect("present");
    assert_eq!(refetched.title, "V3");
}

#[test]
fn racing_cold_requests_may_both_delegate_but_first_result_wins() {
    let source = CountingSource {
        delay: Some(Duration::from_millis(20)),
        ..CountingSource::default()
    };
    let cache = Arc::new(CachingVideoSource::new(source));
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                cache.get_video_info(&id("hot")).unwrap().expect("present")
            })
        })
        .collect();
    let results: Vec<Video> = handles
        .into_iter()
        .map(|handle| handle.join().expect("worker finished"))
        .collect();

    assert!(cache.inner().calls() >= 1 && cache.inner().calls() <= 2);
    assert_eq!(results[0], results[1]);

    let settled = cache.get_video_info(&id("hot")).unwrap().expect("present");
    assert_eq!(settled, results[0]);
}

#[test]
fn service_over_cache_validates_ids_before_delegating() {
    let cache =
        CachingVideoSource::with_config(CountingSource::default(), CacheConfig::bounded(4))
            .unwrap();
    let service = VideoService::new(cache);

    let err = service.get_video("not valid!").unwrap_err();
    assert!(matches!(err, SourceError::Validation(_)));
    assert_eq!(service.source().inner().calls(), 0);

    service.get_video(" 42 ").unwrap();
    service.get_video("42").unwrap();
    assert_eq!(service.source().inner().calls(), 1);
}
