//! Proof verification.
//!
//! Both entry points decode the proof, replay the authentication path from a
//! starting leaf digest and compare the result with the tree's root. They
//! differ only in where that leaf digest comes from.

use tracing::trace;

use crate::{
    DefaultNodes, NodeHasher, SparseMerkleError, SparseMerkleTree,
    config::check_index,
    hash::{hash_leaf, hash_pair},
    proof::SparseTreeProof,
};

impl<H: NodeHasher> SparseMerkleTree<H> {
    /// Verify `proof` for `index` against this tree.
    ///
    /// The path is replayed from the tree's own digest at `index` (explicit or
    /// default), so this checks that the proof is consistent with what the
    /// tree knows about the index. Returns `Ok(false)` on a root mismatch.
    pub fn verify_membership_proof(
        &mut self,
        index: u64,
        proof: &[u8],
    ) -> Result<bool, SparseMerkleError> {
        check_index(self.depth(), index)?;
        let leaf_node = self.node(self.depth(), index).to_vec();
        self.verify_from_leaf_node(index, &leaf_node, proof)
    }

    /// Verify that `proof` shows `value` at `index` under this tree's root.
    ///
    /// `Some(value)` is hashed as a leaf; `None` stands for an empty leaf and
    /// turns the check into a non-membership check. Unlike
    /// [`verify_membership_proof`](Self::verify_membership_proof) the
    /// candidate comes from the caller, not from the tree.
    pub fn verify_leaf_value(
        &mut self,
        index: u64,
        value: Option<&[u8]>,
        proof: &[u8],
    ) -> Result<bool, SparseMerkleError> {
        check_index(self.depth(), index)?;
        let leaf_node = match value {
            Some(value) => {
                let (hasher, _) = self.hasher_and_defaults();
                hash_leaf(hasher, value)?
            }
            None => self.default_nodes().get(self.depth()).to_vec(),
        };
        self.verify_from_leaf_node(index, &leaf_node, proof)
    }

    fn verify_from_leaf_node(
        &mut self,
        index: u64,
        leaf_node: &[u8],
        proof: &[u8],
    ) -> Result<bool, SparseMerkleError> {
        let proof = SparseTreeProof::decode_from_slice(proof, self.hash_size(), self.depth())?;
        let (hasher, defaults) = self.hasher_and_defaults();
        let computed = compute_root(hasher, defaults, index, leaf_node, &proof)?;
        let verified = computed.as_slice() == self.root();
        trace!(index, head = proof.head(), verified, "verified membership proof");
        Ok(verified)
    }
}

/// Recompute the root implied by `proof` when `leaf_node` sits at `index`.
///
/// Levels whose head bit is clear use the default node from `defaults`, so
/// the table must have been built with the same engine and depth as the tree
/// that produced the proof.
pub fn compute_root<H: NodeHasher + ?Sized>(
    hasher: &mut H,
    defaults: &DefaultNodes,
    index: u64,
    leaf_node: &[u8],
    proof: &SparseTreeProof,
) -> Result<Vec<u8>, SparseMerkleError> {
    let depth = defaults.depth();
    check_index(depth, index)?;

    let mut node = leaf_node.to_vec();
    let mut head = proof.head();
    let mut siblings = proof.siblings().iter();
    let mut position = index;
    for level in (1..=depth).rev() {
        let sibling: &[u8] = if head & 1 == 0 {
            defaults.get(level)
        } else {
            siblings.next().map(Vec::as_slice).ok_or_else(|| {
                SparseMerkleError::InvalidProofHead(format!(
                    "missing sibling for level {}",
                    level
                ))
            })?
        };
        node = if position % 2 == 0 {
            hash_pair(hasher, &node, sibling)?
        } else {
            hash_pair(hasher, sibling, &node)?
        };
        head >>= 1;
        position /= 2;
    }
    Ok(node)
}
