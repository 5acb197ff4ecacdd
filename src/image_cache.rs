use crate::error::{FetchError, Result};
use crate::fetcher::NetworkFetcher;
use image::DynamicImage;
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, warn};
use url::Url;

/// Default bound on the number of decoded images kept resident.
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(capacity) => capacity,
    None => panic!("default capacity must be non-zero"),
};

type ImageResult = Result<Arc<DynamicImage>>;
type Waiter = oneshot::Sender<ImageResult>;

// Pending fetches sit outside the LRU map so they can never be evicted;
// only Ready entries compete for capacity.
struct CacheState {
    ready: LruCache<Url, Arc<DynamicImage>>,
    pending: HashMap<Url, Vec<Waiter>>,
}

struct CacheShared {
    fetcher: Arc<dyn NetworkFetcher>,
    state: Mutex<CacheState>,
}

/// Decoded-image cache keyed by remote URL.
///
/// Concurrent callers for the same URL share one underlying network fetch:
/// the first caller becomes the leader and spawns the resolving task, later
/// callers register as waiters on the pending entry. "Check-or-create entry"
/// happens as one step under the state lock, so two callers can never both
/// observe "no entry" and issue duplicate fetches.
#[derive(Clone)]
pub struct ImageCache {
    shared: Arc<CacheShared>,
}

impl ImageCache {
    pub fn new(fetcher: Arc<dyn NetworkFetcher>) -> Self {
        Self::with_capacity(fetcher, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(fetcher: Arc<dyn NetworkFetcher>, capacity: NonZeroUsize) -> Self {
        ImageCache {
            shared: Arc::new(CacheShared {
                fetcher,
                state: Mutex::new(CacheState {
                    ready: LruCache::new(capacity),
                    pending: HashMap::new(),
                }),
            }),
        }
    }

    /// Fetches the image at `raw_url`. A malformed URL fails immediately
    /// without consulting the cache.
    pub async fn fetch(&self, raw_url: &str) -> ImageResult {
        let url = Url::parse(raw_url)
            .map_err(|err| FetchError::InvalidRequest(format!("{raw_url}: {err}")))?;
        self.fetch_url(url).await
    }

    /// Fetches the image at `url`, going to the network only when no Ready
    /// or Pending entry exists for it.
    pub async fn fetch_url(&self, url: Url) -> ImageResult {
        let (receiver, leader) = {
            let mut state = self.shared.state.lock().await;
            if let Some(image) = state.ready.get(&url) {
                debug!(%url, "image cache hit");
                return Ok(Arc::clone(image));
            }

            let (sender, receiver) = oneshot::channel();
            match state.pending.get_mut(&url) {
                Some(waiters) => {
                    waiters.push(sender);
                    (receiver, false)
                }
                None => {
                    state.pending.insert(url.clone(), vec![sender]);
                    (receiver, true)
                }
            }
        };

        if leader {
            // The resolving task is detached: callers may go away, but an
            // issued fetch always runs to completion and notifies whoever
            // is still waiting on it.
            let cache = self.clone();
            let target = url.clone();
            tokio::spawn(async move { cache.resolve(target).await });
        }

        match receiver.await {
            Ok(outcome) => outcome,
            Err(_) => Err(FetchError::TransportError(
                "image fetch was abandoned".to_string(),
            )),
        }
    }

    /// Number of decoded images currently resident.
    pub async fn ready_len(&self) -> usize {
        self.shared.state.lock().await.ready.len()
    }

    /// Whether a Ready entry exists for `url`, without refreshing its
    /// recency.
    pub async fn contains(&self, url: &Url) -> bool {
        self.shared.state.lock().await.ready.contains(url)
    }

    async fn resolve(&self, url: Url) {
        let outcome = self.load(&url).await;

        let waiters = {
            let mut state = self.shared.state.lock().await;
            let waiters = state.pending.remove(&url).unwrap_or_default();
            match &outcome {
                Ok(image) => {
                    state.ready.put(url.clone(), Arc::clone(image));
                }
                // A failed fetch leaves no entry behind; the next caller
                // retries from scratch.
                Err(err) => warn!(%url, %err, "image fetch failed"),
            }
            waiters
        };

        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
    }

    async fn load(&self, url: &Url) -> ImageResult {
        let bytes = self.shared.fetcher.fetch(url).await?;
        let image = image::load_from_memory(&bytes)
            .map_err(|err| FetchError::DecodeError(err.to_string()))?;
        Ok(Arc::new(image))
    }
}
