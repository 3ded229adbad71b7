//! fingerprint.rs — content digests used for change detection.
//!
//! Both the whole-page fingerprint and the candidate-set signature go through
//! `fingerprint`, so a stored digest from one run compares directly with the next.

use sha2::{Digest, Sha256};
use std::fmt::Write as _;

/// SHA-256 of `content` as lowercase hex (64 chars).
pub fn fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(64);
    for b in digest.iter() {
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
