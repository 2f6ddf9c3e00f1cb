//! Download progress event model
//!
//! A single tagged union shared by the fetcher and the interactor. Every
//! download produces a totally ordered sequence of these events ending in
//! exactly one terminal event (`Success` or `Error`); nothing follows a
//! terminal event.

use crate::errors::DownloadError;

/// One element of a download's progress-event sequence
#[derive(Debug)]
pub enum DownloadProgress {
    /// Download started; the remote size is known
    Started {
        /// Declared size of the resource in bytes
        total_bytes: u64,
    },

    /// Download progressed; emitted zero or more times, percentages are
    /// non-decreasing within one sequence
    Progress {
        /// Current progress, 0..=100
        percent: u8,
    },

    /// Download completed successfully; terminal
    Success {
        /// The complete resource payload
        bytes: Vec<u8>,
    },

    /// Download failed; terminal
    Error(DownloadError),
}

impl DownloadProgress {
    /// Whether this event ends its sequence
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DownloadProgress::Success { .. } | DownloadProgress::Error(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_events() {
        assert!(DownloadProgress::Success { bytes: vec![] }.is_terminal());
        assert!(DownloadProgress::Error(DownloadError::MissingContentLength).is_terminal());
        assert!(!DownloadProgress::Started { total_bytes: 10 }.is_terminal());
        assert!(!DownloadProgress::Progress { percent: 50 }.is_terminal());
    }
}
