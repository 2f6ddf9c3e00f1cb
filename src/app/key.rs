//! Cache key encoding
//!
//! Cached files are located by a suffix match on their file name, so the
//! URL has to be turned into a stable identifier that is safe to use in a
//! file name. The URL bytes are gzip-compressed first to bound the name
//! length for long URLs, then encoded with the URL-safe base64 alphabet,
//! which contains no path separators on any supported platform.

use std::io::Write;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::write::GzEncoder;
use flate2::Compression;

/// Encode a URL into a deterministic, filesystem-safe cache key.
///
/// The encoding is pure and never fails: empty strings and non-ASCII URLs
/// are handled like any other input.
pub fn encode_url(url: &str) -> String {
    URL_SAFE_NO_PAD.encode(compress(url.as_bytes()))
}

fn compress(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    // Writing to a Vec cannot fail.
    encoder
        .write_all(bytes)
        .and_then(|_| encoder.finish())
        .unwrap_or_else(|_| bytes.to_vec())
}
