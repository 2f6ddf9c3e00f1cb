//! Error types for the image fetcher
//!
//! This module defines error types for the cache store and the network
//! fetcher. Network-path errors are part of the normal progress-event
//! vocabulary and always reach the caller; cache-path errors are isolated
//! so that cache malfunctions never turn a successful download into a
//! reported failure.

use std::path::PathBuf;
use thiserror::Error;

/// Cache store errors
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache operation invoked before `init()` was called with a directory
    #[error("Cache directory is not set. Call init() first")]
    NotInitialized,

    /// Cache directory could not be created or accessed
    #[error("Cache directory not accessible: {path}")]
    DirectoryNotAccessible { path: PathBuf },

    /// I/O error during cache file operations
    #[error("Cache file I/O error")]
    Io(#[from] std::io::Error),
}

/// Download and HTTP client errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// HTTP request error
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// Invalid URL provided
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Server returned a non-success status
    #[error("Server error: HTTP {status}")]
    ServerError { status: u16 },

    /// Response carried no Content-Length header
    #[error("Response did not declare a content length")]
    MissingContentLength,

    /// I/O error while reading the response body
    #[error("I/O error reading response body")]
    Io(#[from] std::io::Error),
}

/// Top-level error that can represent any component error
#[derive(Error, Debug)]
pub enum AppError {
    /// Cache error
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Download error
    #[error(transparent)]
    Download(#[from] DownloadError),
}

impl AppError {
    /// Get error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Cache(_) => "cache",
            AppError::Download(_) => "download",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Cache result type alias
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Download result type alias
pub type DownloadResult<T> = std::result::Result<T, DownloadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let cache_error = AppError::Cache(CacheError::NotInitialized);
        assert_eq!(cache_error.category(), "cache");

        let download_error = AppError::Download(DownloadError::ServerError { status: 503 });
        assert_eq!(download_error.category(), "download");
    }

    #[test]
    fn test_not_initialized_message() {
        let err = CacheError::NotInitialized;
        assert!(err.to_string().contains("init()"));
    }
}
