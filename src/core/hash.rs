use sha2::{Digest, Sha256};

/// SHA-256 hex digest of an identifier's UTF-8 bytes. Unsalted: the platform
/// matches records by digest, so equal inputs must hash equally everywhere.
pub fn hash_identifier(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}
