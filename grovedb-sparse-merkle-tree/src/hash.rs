//! Digest engines and the node hashing scheme.
//!
//! Leaves hash as `H(value)` and internal nodes as `H(left || right)`. There
//! is no domain separation between the two; the tree's fixed depth already
//! tells a verifier which level every digest belongs to.

use crate::SparseMerkleError;

/// A resettable, incrementally fed hash function with a fixed output length.
///
/// A hash is computed as `reset`, one or more `write`s, then `sum`. The
/// sequence mutates internal state, so an engine must never be shared between
/// interleaved computations; a tree owns its engine exclusively.
pub trait NodeHasher {
    /// Digest length in bytes. Must be constant for a given instance.
    fn output_size(&self) -> usize;

    /// Discard any absorbed input.
    fn reset(&mut self);

    /// Absorb `data`. Engines backed by fallible I/O report failures here.
    fn write(&mut self, data: &[u8]) -> Result<(), SparseMerkleError>;

    /// Produce the digest of everything written since the last reset.
    fn sum(&mut self) -> Vec<u8>;
}

/// Hash a single byte string: `H(data)`.
pub(crate) fn hash_leaf<H: NodeHasher + ?Sized>(
    hasher: &mut H,
    data: &[u8],
) -> Result<Vec<u8>, SparseMerkleError> {
    hasher.reset();
    hasher.write(data)?;
    Ok(hasher.sum())
}

/// Hash two children together: `H(left || right)`.
pub(crate) fn hash_pair<H: NodeHasher + ?Sized>(
    hasher: &mut H,
    left: &[u8],
    right: &[u8],
) -> Result<Vec<u8>, SparseMerkleError> {
    hasher.reset();
    hasher.write(left)?;
    hasher.write(right)?;
    Ok(hasher.sum())
}

impl<H: NodeHasher + ?Sized> NodeHasher for Box<H> {
    fn output_size(&self) -> usize {
        (**self).output_size()
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn write(&mut self, data: &[u8]) -> Result<(), SparseMerkleError> {
        (**self).write(data)
    }

    fn sum(&mut self) -> Vec<u8> {
        (**self).sum()
    }
}

/// Adapter for any RustCrypto fixed-output digest, e.g. `sha2::Sha256`.
#[cfg(feature = "sha2")]
#[derive(Debug, Clone, Default)]
pub struct DigestHasher<D> {
    inner: D,
}

#[cfg(feature = "sha2")]
impl<D> DigestHasher<D>
where
    D: sha2::digest::Digest + sha2::digest::FixedOutputReset,
{
    /// Wrap an existing digest instance.
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

#[cfg(feature = "sha2")]
impl DigestHasher<sha2::Sha256> {
    /// A SHA-256 engine (32-byte digests).
    pub fn sha256() -> Self {
        Self::new(sha2::Sha256::default())
    }
}

#[cfg(feature = "sha2")]
impl<D> NodeHasher for DigestHasher<D>
where
    D: sha2::digest::Digest + sha2::digest::FixedOutputReset,
{
    fn output_size(&self) -> usize {
        <D as sha2::digest::Digest>::output_size()
    }

    fn reset(&mut self) {
        sha2::digest::Digest::reset(&mut self.inner);
    }

    fn write(&mut self, data: &[u8]) -> Result<(), SparseMerkleError> {
        sha2::digest::Digest::update(&mut self.inner, data);
        Ok(())
    }

    fn sum(&mut self) -> Vec<u8> {
        sha2::digest::Digest::finalize_reset(&mut self.inner).to_vec()
    }
}

/// Blake3 engine producing 32-byte digests.
#[cfg(feature = "blake3")]
#[derive(Debug, Clone, Default)]
pub struct Blake3Hasher {
    inner: blake3::Hasher,
}

#[cfg(feature = "blake3")]
impl Blake3Hasher {
    /// Create a fresh engine.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "blake3")]
impl NodeHasher for Blake3Hasher {
    fn output_size(&self) -> usize {
        blake3::OUT_LEN
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn write(&mut self, data: &[u8]) -> Result<(), SparseMerkleError> {
        self.inner.update(data);
        Ok(())
    }

    fn sum(&mut self) -> Vec<u8> {
        let digest = self.inner.finalize();
        self.inner.reset();
        digest.as_bytes().to_vec()
    }
}
