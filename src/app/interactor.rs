//! Download orchestration
//!
//! Composes the cache store and the fetcher behind a single operation:
//! `request_image` serves a cache hit as one immediate `Success` event
//! (refreshing the entry's recency in the background) and otherwise proxies
//! the fetcher's event stream, attempting a capacity-checked cache insert
//! when the terminal `Success` event passes through. Cache failures are
//! logged and swallowed so they can never turn a successful download into a
//! reported failure.

use std::sync::Arc;

use async_stream::stream;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::app::cache::{CacheConfig, DownloadCache};
use crate::app::fetcher::FileFetcher;
use crate::app::progress::DownloadProgress;
use crate::errors::CacheResult;

/// Orchestrates cache lookups and network fetches for image requests
pub struct DownloadInteractor<F, C> {
    fetcher: Arc<F>,
    cache: Arc<C>,
    config: CacheConfig,
}

impl<F, C> DownloadInteractor<F, C>
where
    F: FileFetcher + 'static,
    C: DownloadCache + 'static,
{
    /// Create an interactor with the default cache configuration
    pub fn new(fetcher: F, cache: C) -> Self {
        Self::with_config(fetcher, cache, CacheConfig::default())
    }

    /// Create an interactor with a custom cache configuration
    pub fn with_config(fetcher: F, cache: C, config: CacheConfig) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            cache: Arc::new(cache),
            config,
        }
    }

    /// Current cache configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Replace the cache configuration; applied on the next request
    pub fn set_config(&mut self, config: CacheConfig) {
        self.config = config;
    }

    /// Request the resource at `url`, producing a progress-event sequence.
    ///
    /// A cache hit emits exactly one `Success` event with the stored bytes
    /// and never emits `Started` or `Progress`; the entry's recency is
    /// refreshed in the background without blocking emission. On a miss the
    /// fetcher's events are forwarded unchanged, with a best-effort cache
    /// insert when the terminal `Success` arrives.
    pub async fn request_image(&self, url: &str) -> BoxStream<'static, DownloadProgress> {
        info!("Requested image: {}", url);

        if let Err(e) = self.cache.init(&self.config.cache_dir).await {
            warn!("Cache init failed, continuing without cache: {}", e);
        }

        if self.cache.is_initialized().await {
            match self.cache.find(url).await {
                Ok(Some(bytes)) => {
                    debug!("Serving {} from cache ({} bytes)", url, bytes.len());
                    self.spawn_renew(url);
                    return Box::pin(stream::once(async move {
                        DownloadProgress::Success { bytes }
                    }));
                }
                Ok(None) => debug!("Cache miss for {}", url),
                Err(e) => warn!("Cache lookup failed, treating as miss: {}", e),
            }
        }

        let events = self.fetcher.download_file(url);
        let cache = Arc::clone(&self.cache);
        let config = self.config.clone();
        let url = url.to_owned();

        Box::pin(stream! {
            let mut events = events;
            while let Some(event) = events.next().await {
                if let DownloadProgress::Success { bytes } = &event {
                    if cache.is_initialized().await {
                        if let Err(e) = try_cache(&*cache, &config, &url, bytes).await {
                            warn!("Best-effort cache write failed: {}", e);
                        }
                    }
                }
                yield event;
            }
        })
    }

    /// Refresh the recency of a hit entry without blocking the caller.
    /// Best effort: a renew that loses a race with eviction is acceptable.
    fn spawn_renew(&self, url: &str) {
        let cache = Arc::clone(&self.cache);
        let url = url.to_owned();
        tokio::spawn(async move {
            if let Err(e) = cache.renew(&url).await {
                warn!("Cache renew failed for {}: {}", url, e);
            }
        });
    }
}

/// Capacity-checked cache insert.
///
/// Skips entirely when caching is administratively disabled or the item can
/// never fit, then evicts oldest-first until both limits admit the new item
/// (or the store is empty), and finally writes unconditionally: best
/// effort, last write wins.
async fn try_cache<C: DownloadCache>(
    cache: &C,
    config: &CacheConfig,
    url: &str,
    bytes: &[u8],
) -> CacheResult<()> {
    if !config.caching_enabled() {
        debug!("Caching disabled by configuration");
        return Ok(());
    }

    if bytes.len() as u64 > config.max_cache_size {
        debug!(
            "Item of {} bytes exceeds cache limit of {}, skipping",
            bytes.len(),
            config.max_cache_size
        );
        return Ok(());
    }

    while !space_available(cache, config, bytes.len()).await? && cache.item_count().await? > 0 {
        debug!("Cache space unavailable, evicting oldest entry");
        cache.evict_oldest().await?;
    }

    debug!("Caching {} bytes for {}", bytes.len(), url);
    cache.put(url, bytes).await
}

async fn space_available<C: DownloadCache>(
    cache: &C,
    config: &CacheConfig,
    new_item_size: usize,
) -> CacheResult<bool> {
    let total_size = cache.total_size().await?;
    let item_count = cache.item_count().await?;

    Ok(total_size + new_item_size as u64 <= config.max_cache_size
        && item_count + 1 <= config.max_item_count)
}
