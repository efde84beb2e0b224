//! Hash functions injected into the rogue-key resistant signer.
//!
//! The coefficient derivation only needs a fixed-width digest, so it is
//! abstracted behind [`Hasher`]; [`Blake3Hasher`] is the default, reading the
//! requested number of bytes from the BLAKE3 extendable output.

use crate::config::{DEFAULT_COEFFICIENT_HASH_SIZE, MAX_COEFFICIENT_HASH_SIZE};
use crate::errors::Error;

/// Fixed-width hash function.
pub trait Hasher: Send + Sync {
    /// Hashes `data`, returning exactly [`size`](Self::size) bytes.
    fn compute(&self, data: &[u8]) -> Vec<u8>;

    /// Output width in bytes.
    fn size(&self) -> usize;
}

/// BLAKE3 in XOF mode truncated to a configurable width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blake3Hasher {
    size: usize,
}

impl Blake3Hasher {
    /// Creates a hasher producing `size` bytes, `1..=64`.
    pub fn new(size: usize) -> Result<Self, Error> {
        if size == 0 || size > MAX_COEFFICIENT_HASH_SIZE {
            return Err(Error::InvalidParam(format!(
                "hash size must be within [1, {MAX_COEFFICIENT_HASH_SIZE}], got {size}"
            )));
        }
        Ok(Self { size })
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self {
            size: DEFAULT_COEFFICIENT_HASH_SIZE,
        }
    }
}

impl Hasher for Blake3Hasher {
    fn compute(&self, data: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; self.size];
        let mut hasher = blake3::Hasher::new();
        hasher.update(data);
        hasher.finalize_xof().fill(&mut out);
        out
    }

    fn size(&self) -> usize {
        self.size
    }
}
