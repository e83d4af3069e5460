//! BLAKE3-derived seeds for deterministic (stub) embeddings.

/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// Stable across platforms and Rust releases, unlike `std`'s `DefaultHasher`, so stub
/// arrays written on one machine compare equal to ones written on another.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Seed for one token row: depends on the whole text, the position and the token itself.
#[inline]
pub fn token_seed(text: &str, position: usize, token: &str) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(text.len() as u64).to_le_bytes());
    hasher.update(text.as_bytes());
    hasher.update(&(position as u64).to_le_bytes());
    hasher.update(token.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hasher.finalize().as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}
