//! Image Fetcher Library
//!
//! A Rust library for downloading images over HTTP with incremental
//! progress reporting and a bounded disk cache. Cache hits are served as a
//! single success event; misses stream from the network and populate the
//! cache best-effort under size and item-count limits with oldest-first
//! eviction.

pub mod app;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use app::{
    CacheConfig, DownloadCache, DownloadInteractor, DownloadProgress, FileCache, FileFetcher,
    HttpFetcher,
};
pub use errors::{AppError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use constants::*;

    #[test]
    fn test_constants_accessible() {
        assert_eq!(DEFAULT_MAX_ITEM_COUNT, 16);
        assert_eq!(DEFAULT_MAX_CACHE_SIZE, 10 * 1024 * 1024);
        assert!(USER_AGENT.contains("image-fetcher"));
    }

    #[test]
    fn test_error_types() {
        let cache_error = errors::CacheError::NotInitialized;
        let app_error = AppError::Cache(cache_error);
        assert_eq!(app_error.category(), "cache");
    }
}
