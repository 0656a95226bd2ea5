//! Utility functions for content hashing.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 fingerprint over an ordered list of parts.
///
/// Parts are joined with `:` before hashing, so `["a", "b"]` and `["ab"]`
/// produce different digests. Returns the hex-encoded digest.
#[must_use]
pub fn fingerprint<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut hasher = Sha256::new();
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            hasher.update(b":");
        }
        hasher.update(part.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
