//! Cache configuration types and defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::cache;

/// Configuration for the disk cache
///
/// Owned by the interactor and re-applied to the store at the start of
/// every request. Setting either limit to zero disables caching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Root directory for cached files (empty path disables caching)
    pub cache_dir: PathBuf,
    /// Maximum total cache size in bytes (0 = caching disabled)
    pub max_cache_size: u64,
    /// Maximum number of cached items (0 = caching disabled)
    pub max_item_count: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            max_cache_size: cache::DEFAULT_MAX_CACHE_SIZE,
            max_item_count: cache::DEFAULT_MAX_ITEM_COUNT,
        }
    }
}

impl CacheConfig {
    /// Create a configuration with a custom cache directory
    pub fn with_cache_dir(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            ..Default::default()
        }
    }

    /// Set maximum total cache size in bytes
    pub fn with_max_cache_size(mut self, max_size: u64) -> Self {
        self.max_cache_size = max_size;
        self
    }

    /// Set maximum number of cached items
    pub fn with_max_item_count(mut self, max_items: usize) -> Self {
        self.max_item_count = max_items;
        self
    }

    /// Whether the configured limits permit caching at all
    pub fn caching_enabled(&self) -> bool {
        self.max_cache_size > 0 && self.max_item_count > 0
    }
}

/// Default cache directory under the OS cache location:
/// - macOS: `~/Library/Caches/image-fetcher`
/// - Linux: `~/.cache/image-fetcher`
/// - Windows: `%LOCALAPPDATA%/image-fetcher`
///
/// Falls back to an empty path (caching disabled) when the OS cache
/// directory cannot be determined.
fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join(cache::DEFAULT_CACHE_DIR_NAME))
        .unwrap_or_default()
}
