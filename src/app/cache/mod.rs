//! Bounded disk cache for downloaded payloads
//!
//! Entries are flat files named `{millisecond-timestamp}_{encoded-url}`;
//! the timestamp prefix doubles as the recency ordering used to pick
//! eviction victims, and the encoded-URL suffix is the lookup key. A
//! store-wide mutex serializes all directory operations.
//!
//! # Module Organization
//!
//! - [`config`] - Configuration types and defaults
//! - [`store`] - The [`DownloadCache`] trait and disk-backed [`FileCache`]

pub mod config;
pub mod store;

// Re-export main public API
pub use config::CacheConfig;
pub use store::{DownloadCache, FileCache};
