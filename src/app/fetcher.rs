//! Streaming HTTP fetcher
//!
//! Downloads a resource in chunks sized so that a transfer produces roughly
//! one hundred progress updates, never reading less than 1 KiB or more than
//! 1 MiB at a time. The returned stream is cold and single-pass: nothing
//! happens until it is polled, and consuming it again issues a new request.
//! Dropping the stream at any point drops the HTTP response, releasing the
//! underlying connection.

use async_stream::stream;
use futures::stream::BoxStream;
use futures::TryStreamExt;
use reqwest::Client;
use tokio::io::AsyncReadExt;
use tokio_util::io::StreamReader;
use tracing::{debug, warn};
use url::Url;

use crate::app::progress::DownloadProgress;
use crate::constants::{buffer, http};
use crate::errors::{DownloadError, DownloadResult};

/// Source of download progress-event sequences
pub trait FileFetcher: Send + Sync {
    /// Begin a download of `url`, producing events as bytes arrive.
    ///
    /// Exactly one terminal event ([`DownloadProgress::Success`] or
    /// [`DownloadProgress::Error`]) ends the sequence.
    fn download_file(&self, url: &str) -> BoxStream<'static, DownloadProgress>;
}

/// [`FileFetcher`] over a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default client configuration
    ///
    /// # Errors
    ///
    /// Returns `DownloadError::Http` if the HTTP client cannot be built
    pub fn new() -> DownloadResult<Self> {
        let client = Client::builder()
            .timeout(http::DEFAULT_TIMEOUT)
            .connect_timeout(http::CONNECT_TIMEOUT)
            .user_agent(http::USER_AGENT)
            .pool_idle_timeout(http::POOL_IDLE_TIMEOUT)
            .pool_max_idle_per_host(http::POOL_MAX_PER_HOST)
            .build()
            .map_err(DownloadError::Http)?;

        Ok(Self { client })
    }

    /// Create a fetcher over an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Read buffer size for a transfer of `total_bytes`: roughly one hundred
/// progress updates, clamped to [1 KiB, 1 MiB].
fn buffer_size_for(total_bytes: u64) -> usize {
    usize::try_from(total_bytes / buffer::PROGRESS_STEPS)
        .unwrap_or(buffer::MAX_BUFFER_SIZE)
        .clamp(buffer::MIN_BUFFER_SIZE, buffer::MAX_BUFFER_SIZE)
}

/// Rounded percentage of `offset` against `total`; 100 when `total` is zero
fn percent_of(offset: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    ((offset as f64 * 100.0 / total as f64).round() as u8).min(100)
}

impl FileFetcher for HttpFetcher {
    fn download_file(&self, url: &str) -> BoxStream<'static, DownloadProgress> {
        let client = self.client.clone();
        let url = url.to_owned();

        Box::pin(stream! {
            let parsed = match Url::parse(&url) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("Rejected invalid download URL: {}", e);
                    yield DownloadProgress::Error(DownloadError::InvalidUrl {
                        url,
                        error: e.to_string(),
                    });
                    return;
                }
            };

            let response = match client.get(parsed).send().await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Download request failed: {}", e);
                    yield DownloadProgress::Error(DownloadError::Http(e));
                    return;
                }
            };

            let status = response.status();
            if !status.is_success() {
                warn!("Download rejected with HTTP {}", status);
                yield DownloadProgress::Error(DownloadError::ServerError {
                    status: status.as_u16(),
                });
                return;
            }

            let total_bytes = match response.content_length() {
                Some(total_bytes) => total_bytes,
                None => {
                    yield DownloadProgress::Error(DownloadError::MissingContentLength);
                    return;
                }
            };

            yield DownloadProgress::Started { total_bytes };

            let buffer_size = buffer_size_for(total_bytes);
            debug!("Downloading {} bytes with {} byte buffer", total_bytes, buffer_size);

            let body = response
                .bytes_stream()
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
            let mut reader = StreamReader::new(Box::pin(body));

            let mut data = Vec::with_capacity(total_bytes as usize);
            let mut buf = vec![0u8; buffer_size];

            loop {
                let remaining = (total_bytes as usize).saturating_sub(data.len());
                let want = buffer_size.min(remaining);
                if want == 0 {
                    break;
                }

                match reader.read(&mut buf[..want]).await {
                    Ok(0) => break,
                    Ok(n) => {
                        data.extend_from_slice(&buf[..n]);
                        yield DownloadProgress::Progress {
                            percent: percent_of(data.len() as u64, total_bytes),
                        };
                    }
                    Err(e) => {
                        warn!("Body read failed after {} bytes: {}", data.len(), e);
                        yield DownloadProgress::Error(DownloadError::Io(e));
                        return;
                    }
                }
            }

            debug!("Downloaded {} bytes", data.len());
            yield DownloadProgress::Success { bytes: data };
        })
    }
}
