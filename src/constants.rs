//! Application constants for the image fetcher
//!
//! This module centralizes all constants used throughout the crate,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "image-fetcher/0.1.0";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 8;
}

/// Download buffer sizing
pub mod buffer {
    /// Smallest read buffer used for a single transfer (1 KiB)
    pub const MIN_BUFFER_SIZE: usize = 1024;

    /// Largest read buffer used for a single transfer (1 MiB)
    pub const MAX_BUFFER_SIZE: usize = 1024 * 1024;

    /// Target number of progress updates per transfer
    pub const PROGRESS_STEPS: u64 = 100;
}

/// Cache limits and defaults
pub mod cache {
    /// Default maximum total cache size in bytes (10 MiB)
    pub const DEFAULT_MAX_CACHE_SIZE: u64 = 10 * 1024 * 1024;

    /// Default maximum number of cached items
    pub const DEFAULT_MAX_ITEM_COUNT: usize = 16;

    /// Directory name used when no cache root is configured
    pub const DEFAULT_CACHE_DIR_NAME: &str = "image-fetcher";
}

// Re-export commonly used constants for convenience
pub use cache::{DEFAULT_MAX_CACHE_SIZE, DEFAULT_MAX_ITEM_COUNT};
pub use http::USER_AGENT;
