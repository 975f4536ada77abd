use sha2::{Digest, Sha256};

/// Length of the truncated body fingerprint, in hex characters.
pub const DIGEST_LEN: usize = 10;

/// Fixed-length fingerprint of a document body: the first 10 lowercase hex
/// characters of SHA-256 over its UTF-8 bytes.
///
/// This is tamper-evidence, not security: at 40 bits the truncation is
/// deliberately not collision-resistant, and the length is kept at exactly
/// 10 characters for compatibility with already-stamped documents.
#[must_use]
pub fn digest10(body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    let mut hex = format!("{:x}", hasher.finalize());
    hex.truncate(DIGEST_LEN);
    hex
}
