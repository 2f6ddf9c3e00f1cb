//! Disk-backed keyed blob store
//!
//! Cached payloads live as flat files named `{millis}_{encoded-url}` in a
//! single directory. There is no manifest or index: the directory contents
//! are the source of truth, entries are discovered by suffix match on the
//! encoded URL and ordered by the timestamp prefix. One store-wide mutex
//! serializes every directory operation so that the size and count observed
//! by the eviction loop stay consistent with concurrent writers.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::app::key::encode_url;
use crate::errors::{CacheError, CacheResult};

/// Keyed byte-blob store populated by downloads
///
/// Mirrors the seam the interactor is tested against: implementations must
/// serialize their own mutations.
#[async_trait]
pub trait DownloadCache: Send + Sync {
    /// Set the store's active root directory, creating it if absent.
    /// Idempotent; an empty path leaves the store uninitialized.
    async fn init(&self, dir: &Path) -> CacheResult<()>;

    /// True iff `init` has been called with a non-empty directory
    async fn is_initialized(&self) -> bool;

    /// Write `bytes` as a newly named entry for `url`
    async fn put(&self, url: &str, bytes: &[u8]) -> CacheResult<()>;

    /// Return the stored payload for `url`, or `None` on a miss
    async fn find(&self, url: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Refresh the recency of the entry for `url` without touching its
    /// content; no-op if the entry is absent
    async fn renew(&self, url: &str) -> CacheResult<()>;

    /// Number of entries currently stored
    async fn item_count(&self) -> CacheResult<usize>;

    /// Sum of stored file sizes in bytes
    async fn total_size(&self) -> CacheResult<u64>;

    /// Delete the single oldest entry; no-op on an empty store
    async fn evict_oldest(&self) -> CacheResult<()>;

    /// Delete every entry
    async fn clear(&self) -> CacheResult<()>;
}

/// Disk-backed [`DownloadCache`] over a configured directory
#[derive(Debug, Default)]
pub struct FileCache {
    root: Mutex<Option<PathBuf>>,
}

impl FileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// File name for a fresh entry: timestamp prefix for recency ordering
    /// and uniqueness, encoded URL suffix for lookup.
    fn entry_name(url: &str) -> String {
        format!("{}_{}", Utc::now().timestamp_millis(), encode_url(url))
    }

    /// Locate the entry whose name ends with the encoded form of `url`
    async fn find_entry(root: &Path, url: &str) -> CacheResult<Option<PathBuf>> {
        let suffix = encode_url(url);
        let mut entries = fs::read_dir(root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name().to_string_lossy().ends_with(&suffix) {
                return Ok(Some(entry.path()));
            }
        }
        Ok(None)
    }

    /// Collect the names and sizes of all entries under `root`
    async fn scan(root: &Path) -> CacheResult<Vec<(String, u64)>> {
        let mut found = Vec::new();
        let mut entries = fs::read_dir(root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let size = entry.metadata().await?.len();
            found.push((entry.file_name().to_string_lossy().into_owned(), size));
        }
        Ok(found)
    }
}

#[async_trait]
impl DownloadCache for FileCache {
    async fn init(&self, dir: &Path) -> CacheResult<()> {
        let mut root = self.root.lock().await;

        if dir.as_os_str().is_empty() {
            *root = None;
            return Ok(());
        }

        fs::create_dir_all(dir).await.map_err(|e| {
            error!("Failed to create cache directory {}: {}", dir.display(), e);
            CacheError::DirectoryNotAccessible {
                path: dir.to_path_buf(),
            }
        })?;

        if root.as_deref() != Some(dir) {
            info!("Initialized cache at {}", dir.display());
        }
        *root = Some(dir.to_path_buf());
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.root.lock().await.is_some()
    }

    async fn put(&self, url: &str, bytes: &[u8]) -> CacheResult<()> {
        let root = self.root.lock().await;
        let root = root.as_deref().ok_or(CacheError::NotInitialized)?;

        let path = root.join(Self::entry_name(url));
        fs::write(&path, bytes).await?;
        debug!("Cached {} bytes at {}", bytes.len(), path.display());
        Ok(())
    }

    async fn find(&self, url: &str) -> CacheResult<Option<Vec<u8>>> {
        let root = self.root.lock().await;
        let root = root.as_deref().ok_or(CacheError::NotInitialized)?;

        match Self::find_entry(root, url).await? {
            Some(path) => {
                let bytes = fs::read(&path).await?;
                debug!("Cache hit: {}", path.display());
                Ok(Some(bytes))
            }
            None => {
                debug!("Cache miss for url");
                Ok(None)
            }
        }
    }

    async fn renew(&self, url: &str) -> CacheResult<()> {
        let root = self.root.lock().await;
        let root = root.as_deref().ok_or(CacheError::NotInitialized)?;

        if let Some(path) = Self::find_entry(root, url).await? {
            let renewed = root.join(Self::entry_name(url));
            fs::rename(&path, &renewed).await?;
            debug!("Renewed cache entry: {}", renewed.display());
        }
        Ok(())
    }

    async fn item_count(&self) -> CacheResult<usize> {
        let root = self.root.lock().await;
        let root = root.as_deref().ok_or(CacheError::NotInitialized)?;
        Ok(Self::scan(root).await?.len())
    }

    async fn total_size(&self) -> CacheResult<u64> {
        let root = self.root.lock().await;
        let root = root.as_deref().ok_or(CacheError::NotInitialized)?;
        Ok(Self::scan(root).await?.iter().map(|(_, size)| size).sum())
    }

    async fn evict_oldest(&self) -> CacheResult<()> {
        let root = self.root.lock().await;
        let root = root.as_deref().ok_or(CacheError::NotInitialized)?;

        // Timestamp-prefixed names make the lexicographically smallest name
        // the oldest entry.
        let oldest = Self::scan(root)
            .await?
            .into_iter()
            .map(|(name, _)| name)
            .min();

        if let Some(name) = oldest {
            fs::remove_file(root.join(&name)).await?;
            debug!("Evicted oldest cache entry: {}", name);
        }
        Ok(())
    }

    async fn clear(&self) -> CacheResult<()> {
        let root = self.root.lock().await;
        let root = root.as_deref().ok_or(CacheError::NotInitialized)?;

        for (name, _) in Self::scan(root).await? {
            fs::remove_file(root.join(&name)).await?;
        }
        info!("Cleared cache at {}", root.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn init_cache(dir: &Path) -> FileCache {
        let cache = FileCache::new();
        cache.init(dir).await.unwrap();
        cache
    }

    #[tokio::test]
    async fn test_operations_fail_before_init() {
        let cache = FileCache::new();
        assert!(!cache.is_initialized().await);
        assert!(matches!(
            cache.put("u", b"x").await,
            Err(CacheError::NotInitialized)
        ));
        assert!(matches!(
            cache.find("u").await,
            Err(CacheError::NotInitialized)
        ));
        assert!(matches!(
            cache.evict_oldest().await,
            Err(CacheError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn test_empty_dir_leaves_store_uninitialized() {
        let cache = FileCache::new();
        cache.init(Path::new("")).await.unwrap();
        assert!(!cache.is_initialized().await);
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let cache = init_cache(temp_dir.path()).await;
        cache.put("url", b"payload").await.unwrap();

        cache.init(temp_dir.path()).await.unwrap();
        assert!(cache.is_initialized().await);
        assert_eq!(cache.item_count().await.unwrap(), 1);
        assert_eq!(cache.find("url").await.unwrap().unwrap(), b"payload");
    }

    #[tokio::test]
    async fn test_put_then_find_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let cache = init_cache(temp_dir.path()).await;

        let url = "https://example.com/img.png?v=2";
        cache.put(url, &[1, 2, 3]).await.unwrap();

        assert_eq!(cache.find(url).await.unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(cache.find("https://other.example").await.unwrap(), None);
        assert_eq!(cache.item_count().await.unwrap(), 1);
        assert_eq!(cache.total_size().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_renew_replaces_entry_without_changing_content() {
        let temp_dir = TempDir::new().unwrap();
        let cache = init_cache(temp_dir.path()).await;

        let url = "https://example.com/img.png";
        cache.put(url, b"content").await.unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;
        cache.renew(url).await.unwrap();

        // Still a single entry with identical content
        assert_eq!(cache.item_count().await.unwrap(), 1);
        assert_eq!(cache.find(url).await.unwrap().unwrap(), b"content");
    }

    #[tokio::test]
    async fn test_renew_missing_entry_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let cache = init_cache(temp_dir.path()).await;
        cache.renew("https://nowhere.example").await.unwrap();
        assert_eq!(cache.item_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_evict_oldest_removes_oldest_first() {
        let temp_dir = TempDir::new().unwrap();
        let cache = init_cache(temp_dir.path()).await;

        cache.put("https://a.example", b"aa").await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        cache.put("https://b.example", b"bb").await.unwrap();

        cache.evict_oldest().await.unwrap();
        assert_eq!(cache.find("https://a.example").await.unwrap(), None);
        assert!(cache.find("https://b.example").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_evict_on_empty_store_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let cache = init_cache(temp_dir.path()).await;
        cache.evict_oldest().await.unwrap();
        assert_eq!(cache.item_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_renewed_entry_survives_eviction_of_older() {
        let temp_dir = TempDir::new().unwrap();
        let cache = init_cache(temp_dir.path()).await;

        cache.put("https://a.example", b"aa").await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        cache.put("https://b.example", b"bb").await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        // Renewing "a" makes "b" the oldest
        cache.renew("https://a.example").await.unwrap();
        cache.evict_oldest().await.unwrap();

        assert!(cache.find("https://a.example").await.unwrap().is_some());
        assert_eq!(cache.find("https://b.example").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let temp_dir = TempDir::new().unwrap();
        let cache = init_cache(temp_dir.path()).await;

        cache.put("https://a.example", b"aa").await.unwrap();
        cache.put("https://b.example", b"bbbb").await.unwrap();
        cache.clear().await.unwrap();

        assert_eq!(cache.item_count().await.unwrap(), 0);
        assert_eq!(cache.total_size().await.unwrap(), 0);
    }
}
