//! Cryptographic hash functions

use crate::error::Result;

pub mod sm3;

pub use sm3::Sm3;

/// Compile-time description of a hash algorithm
pub trait HashAlgorithm {
    /// Digest size in bytes
    const OUTPUT_SIZE: usize;
    /// Message block size in bytes
    const BLOCK_SIZE: usize;
    /// Human-readable algorithm identifier
    const ALGORITHM_ID: &'static str;
}

/// Streaming interface implemented by the hash functions in this crate
pub trait HashFunction: Sized {
    /// Marker type describing the algorithm
    type Algorithm: HashAlgorithm;
    /// Digest type produced by `finalize`
    type Output: AsRef<[u8]> + Clone;

    /// Create a fresh hashing state
    fn new() -> Self;

    /// Absorb input data; may be called repeatedly
    fn update(&mut self, data: &[u8]) -> Result<&mut Self>;

    /// Pad, compress the final blocks, and produce the digest.
    /// The state is scrubbed afterwards and must not be reused.
    fn finalize(&mut self) -> Result<Self::Output>;

    /// One-shot convenience: hash `data` in a fresh state
    fn digest(data: &[u8]) -> Result<Self::Output> {
        let mut hasher = Self::new();
        hasher.update(data)?;
        hasher.finalize()
    }

    /// Digest size in bytes
    fn output_size() -> usize {
        Self::Algorithm::OUTPUT_SIZE
    }

    /// Message block size in bytes
    fn block_size() -> usize {
        Self::Algorithm::BLOCK_SIZE
    }

    /// Algorithm name
    fn name() -> &'static str {
        Self::Algorithm::ALGORITHM_ID
    }
}
