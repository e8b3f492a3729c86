//! Depth limits, index bounds and the tree configuration value.

use crate::{NodeHasher, SparseMerkleError};

/// Maximum supported tree depth. A depth-64 tree addresses every `u64` index.
pub const DEPTH_MAX: u8 = 64;

/// Size in bytes of the proof head bitmap. Fixed regardless of tree depth.
pub const PROOF_HEAD_SIZE: usize = (DEPTH_MAX / 8) as usize;

/// Validate that depth is in the allowed range [0, 64].
pub(crate) fn validate_depth(depth: u8) -> Result<(), SparseMerkleError> {
    if depth > DEPTH_MAX {
        return Err(SparseMerkleError::TooLargeTreeDepth {
            depth,
            max: DEPTH_MAX,
        });
    }
    Ok(())
}

/// Largest valid leaf index for a tree of the given depth, `2^depth - 1`.
///
/// A depth-0 tree has the single index 0; a depth-64 tree ends at
/// `u64::MAX`. Depth must already be validated.
pub fn max_index(depth: u8) -> u64 {
    u64::MAX.checked_shr(u32::from(DEPTH_MAX - depth)).unwrap_or(0)
}

/// Check that `index` lies in `[0, 2^depth)`.
pub(crate) fn check_index(depth: u8, index: u64) -> Result<(), SparseMerkleError> {
    // `checked_shr` yields None for depth 64, where every u64 is in range.
    let in_range = index
        .checked_shr(u32::from(depth))
        .is_none_or(|high| high == 0);
    if !in_range {
        return Err(SparseMerkleError::TooLargeLeafIndex {
            index,
            max_index: max_index(depth),
        });
    }
    Ok(())
}

/// Everything needed to build a tree apart from its leaves: the digest engine
/// the tree will own and the tree depth.
#[derive(Debug, Clone)]
pub struct TreeConfig<H> {
    hasher: H,
    depth: u8,
}

impl<H: NodeHasher> TreeConfig<H> {
    /// Create a config, rejecting depths above [`DEPTH_MAX`].
    pub fn new(hasher: H, depth: u8) -> Result<Self, SparseMerkleError> {
        validate_depth(depth)?;
        Ok(Self { hasher, depth })
    }

    /// Depth of trees built from this config.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Digest length of the configured engine.
    pub fn hash_size(&self) -> usize {
        self.hasher.output_size()
    }

    /// Size in bytes of the longest proof such a tree can produce.
    pub fn max_proof_size(&self) -> usize {
        PROOF_HEAD_SIZE + self.hash_size() * usize::from(self.depth)
    }

    pub(crate) fn into_parts(self) -> (H, u8) {
        (self.hasher, self.depth)
    }
}
