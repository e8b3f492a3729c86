use thiserror::Error;

/// Errors from sparse Merkle tree operations.
///
/// A digest mismatch during verification is not an error; verification
/// returns `Ok(false)` in that case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SparseMerkleError {
    /// The requested depth exceeds 64.
    #[error("too large tree depth: {depth} (max {max})")]
    TooLargeTreeDepth {
        /// Requested depth.
        depth: u8,
        /// Largest supported depth.
        max: u8,
    },
    /// A leaf or queried index is outside `[0, 2^depth)`.
    #[error("too large leaf index: {index} (max {max_index})")]
    TooLargeLeafIndex {
        /// Offending index.
        index: u64,
        /// Largest valid index for the tree's depth.
        max_index: u64,
    },
    /// The proof is longer than any proof the tree could produce.
    #[error("too large proof size: {size} bytes (max {max})")]
    TooLargeProofSize {
        /// Proof length in bytes.
        size: usize,
        /// Longest possible proof for the tree.
        max: usize,
    },
    /// The proof body is not a whole number of digests.
    #[error("invalid proof size: {size} bytes is not a head plus a multiple of {hash_size}")]
    InvalidProofSize {
        /// Proof length in bytes.
        size: usize,
        /// Digest length of the tree's engine.
        hash_size: usize,
    },
    /// The head bitmap disagrees with the proof body or the tree depth.
    #[error("invalid proof head: {0}")]
    InvalidProofHead(String),
    /// The digest engine failed to absorb input.
    #[error("hasher error: {0}")]
    Hasher(String),
}
