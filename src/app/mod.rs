//! Core download/cache orchestration logic
//!
//! This module contains the main components: the cache key codec, the
//! bounded disk cache, the streaming HTTP fetcher, the progress event
//! model, and the interactor composing them.
//!
//! # Examples
//!
//! ```rust,no_run
//! use image_fetcher::app::{CacheConfig, DownloadInteractor, DownloadProgress, FileCache, HttpFetcher};
//! use futures::StreamExt;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CacheConfig::with_cache_dir(PathBuf::from("/tmp/images"));
//! let interactor = DownloadInteractor::with_config(HttpFetcher::new()?, FileCache::new(), config);
//!
//! let mut events = interactor.request_image("https://example.com/cat.png").await;
//! while let Some(event) = events.next().await {
//!     match event {
//!         DownloadProgress::Started { total_bytes } => println!("{} bytes", total_bytes),
//!         DownloadProgress::Progress { percent } => println!("{}%", percent),
//!         DownloadProgress::Success { bytes } => println!("done: {} bytes", bytes.len()),
//!         DownloadProgress::Error(e) => eprintln!("failed: {}", e),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod fetcher;
pub mod interactor;
pub mod key;
pub mod progress;

// Re-export main public API
pub use cache::{CacheConfig, DownloadCache, FileCache};
pub use fetcher::{FileFetcher, HttpFetcher};
pub use interactor::DownloadInteractor;
pub use key::encode_url;
pub use progress::DownloadProgress;
