//! Per-segment street-view image cache.
//!
//! Keys are directed segment pairs: `"from-to"`. Thumbnails for the
//! opposite direction are distinct imagery, so order matters. The cache
//! is bounded with strict first-in-first-out eviction and prefetched one
//! route at a time; requesting a new route supersedes the previous
//! batch's in-flight work through a cooperative cancellation token that
//! is checked before every insertion. That check is the last-writer-wins
//! gate: a stale batch can finish its downloads but can no longer touch
//! the cache.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::NavConfig;
use crate::traits::ImageFetcher;

/// Cache key for the directed segment `from -> to`.
pub fn segment_key(from: usize, to: usize) -> String {
    format!("{}-{}", from, to)
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, String>,
    /// First-insertion order, drives eviction.
    order: VecDeque<String>,
    in_flight: HashSet<String>,
}

/// Bounded FIFO cache of segment image URLs with cancellable prefetch.
pub struct ImageCache<F> {
    fetcher: Arc<F>,
    inner: Arc<Mutex<CacheInner>>,
    capacity: usize,
    default_image: String,
    live_batch: Option<Arc<AtomicBool>>,
}

/// Join barrier for one preload batch.
///
/// Dropping the handle detaches the batch; the fetches keep running and
/// populate the cache in the background.
pub struct PreloadHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl PreloadHandle {
    /// Resolves once every fetch in the batch has settled.
    pub async fn wait(self) {
        for task in self.tasks {
            let _ = task.await;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<F: ImageFetcher> ImageCache<F> {
    pub fn new(fetcher: F, config: &NavConfig) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            inner: Arc::new(Mutex::new(CacheInner::default())),
            capacity: config.cache_capacity,
            default_image: config.default_image.clone(),
            live_batch: None,
        }
    }

    /// Prefetches every not-yet-cached segment image of a path.
    ///
    /// Idempotent per key: segments already cached or already in flight
    /// are skipped. Any previous batch is cancelled first; only one
    /// path's prefetch is live at a time. Without an ambient tokio
    /// runtime the prefetch is skipped and `get` serves placeholders.
    pub fn preload(&mut self, path: &[usize]) -> PreloadHandle {
        self.cancel_pending();
        let token = Arc::new(AtomicBool::new(false));
        self.live_batch = Some(token.clone());

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("no async runtime available, skipping segment prefetch");
            return PreloadHandle { tasks: Vec::new() };
        };

        let mut tasks = Vec::new();
        for pair in path.windows(2) {
            let key = segment_key(pair[0], pair[1]);
            {
                let mut inner = self.inner.lock();
                if inner.entries.contains_key(&key) || inner.in_flight.contains(&key) {
                    continue;
                }
                inner.in_flight.insert(key.clone());
            }
            tasks.push(runtime.spawn(load_one(
                self.fetcher.clone(),
                self.inner.clone(),
                self.capacity,
                key,
                token.clone(),
            )));
        }

        PreloadHandle { tasks }
    }

    /// Cached URL for a segment, or the placeholder on a miss.
    ///
    /// A miss opportunistically starts a background load for that key
    /// without blocking the caller.
    pub fn get(&self, from: usize, to: usize) -> String {
        let key = segment_key(from, to);
        let mut inner = self.inner.lock();
        if let Some(url) = inner.entries.get(&key) {
            return url.clone();
        }

        if !inner.in_flight.contains(&key) {
            if let Ok(runtime) = tokio::runtime::Handle::try_current() {
                inner.in_flight.insert(key.clone());
                let token = self
                    .live_batch
                    .clone()
                    .unwrap_or_else(|| Arc::new(AtomicBool::new(false)));
                runtime.spawn(load_one(
                    self.fetcher.clone(),
                    self.inner.clone(),
                    self.capacity,
                    key,
                    token,
                ));
            }
        }

        self.default_image.clone()
    }

    /// Cancels the live prefetch batch, if any. Expected, not an error.
    pub fn cancel_pending(&mut self) {
        if let Some(token) = self.live_batch.take() {
            token.store(true, Ordering::Release);
            let mut inner = self.inner.lock();
            if !inner.in_flight.is_empty() {
                debug!(
                    pending = inner.in_flight.len(),
                    "superseded in-flight segment prefetch"
                );
            }
            inner.in_flight.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, from: usize, to: usize) -> bool {
        self.inner
            .lock()
            .entries
            .contains_key(&segment_key(from, to))
    }
}

async fn load_one<F: ImageFetcher>(
    fetcher: Arc<F>,
    inner: Arc<Mutex<CacheInner>>,
    capacity: usize,
    key: String,
    cancelled: Arc<AtomicBool>,
) {
    let result = fetcher.fetch(&key).await;

    let mut inner = inner.lock();
    inner.in_flight.remove(&key);
    if cancelled.load(Ordering::Acquire) {
        debug!(key, "preload superseded before insertion, dropping image");
        return;
    }

    match result {
        Ok(url) => insert_bounded(&mut inner, key, url, capacity),
        // Not cached: a later preload retries, and `get` serves the
        // placeholder meanwhile.
        Err(err) => debug!(key, error = %err, "segment image unavailable"),
    }
}

fn insert_bounded(inner: &mut CacheInner, key: String, url: String, capacity: usize) {
    if capacity == 0 {
        return;
    }
    if inner.entries.contains_key(&key) {
        // Refresh in place; the key keeps its original eviction slot.
        inner.entries.insert(key, url);
        return;
    }
    while inner.entries.len() >= capacity {
        match inner.order.pop_front() {
            Some(oldest) => {
                inner.entries.remove(&oldest);
            }
            None => break,
        }
    }
    inner.order.push_back(key.clone());
    inner.entries.insert(key, url);
}
