//! Embedding vector byte conversion
//!
//! Embeddings are persisted in the `videos.embedding` BLOB column as a raw
//! f32 sequence (native byte order on both sides). Round-trip must be exact.

use zerocopy::AsBytes;

/// Encode an embedding vector for BLOB storage
pub fn vector_to_bytes(vector: &[f32]) -> Vec<u8> {
    vector.as_bytes().to_vec()
}

/// Decode an embedding vector from BLOB storage
///
/// Trailing bytes that do not form a whole f32 are ignored.
pub fn bytes_to_vector(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}
