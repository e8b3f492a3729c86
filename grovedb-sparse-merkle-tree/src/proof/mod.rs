//! Membership proofs for the sparse Merkle tree.
//!
//! Encoded layout:
//!
//! ```text
//! [head: u64 big-endian][sibling_0]..[sibling_k]
//! ```
//!
//! Bit `i` of the head covers the level `i` steps above the leaf. A set bit
//! means the sibling at that level is a non-default digest and is carried in
//! the body; a clear bit means the verifier substitutes the level's default
//! node. Siblings are ordered leaf to root, so `k = popcount(head)` and the
//! encoded length is always `8 + hash_size * k`.

use byteorder::{BigEndian, ByteOrder};
use tracing::trace;

use crate::{
    SparseMerkleError, SparseMerkleTree,
    config::{PROOF_HEAD_SIZE, check_index},
};


/// A decoded membership (or non-membership) proof for a single index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseTreeProof {
    head: u64,
    siblings: Vec<Vec<u8>>,
}

impl SparseTreeProof {
    /// Collect the non-default siblings on the path from `index` to the root.
    ///
    /// Reads only explicit nodes; no hashing is performed.
    pub fn generate<H>(tree: &SparseMerkleTree<H>, index: u64) -> Result<Self, SparseMerkleError> {
        let depth = tree.depth();
        check_index(depth, index)?;

        let mut head = 0u64;
        let mut siblings = Vec::new();
        let mut position = index;
        for level in (1..=depth).rev() {
            if let Some(sibling) = tree.explicit_node(level, position ^ 1) {
                head |= 1u64 << (depth - level);
                siblings.push(sibling.to_vec());
            }
            position /= 2;
        }

        trace!(index, head, siblings = siblings.len(), "created membership proof");
        Ok(Self { head, siblings })
    }

    /// Encode as `head || siblings`.
    pub fn encode_to_vec(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; PROOF_HEAD_SIZE];
        BigEndian::write_u64(&mut bytes, self.head);
        bytes.reserve(self.siblings.iter().map(Vec::len).sum());
        for sibling in &self.siblings {
            bytes.extend_from_slice(sibling);
        }
        bytes
    }

    /// Decode a proof produced for a tree of `depth` using `hash_size`-byte
    /// digests.
    ///
    /// Rejects proofs longer than `8 + hash_size * depth`
    /// (`TooLargeProofSize`), proofs whose body is not a whole number of
    /// digests (`InvalidProofSize`), and heads that mark levels outside the
    /// tree or disagree with the number of digests (`InvalidProofHead`).
    pub fn decode_from_slice(
        bytes: &[u8],
        hash_size: usize,
        depth: u8,
    ) -> Result<Self, SparseMerkleError> {
        let max = PROOF_HEAD_SIZE + hash_size * usize::from(depth);
        if bytes.len() > max {
            return Err(SparseMerkleError::TooLargeProofSize {
                size: bytes.len(),
                max,
            });
        }
        let body_len = bytes
            .len()
            .checked_sub(PROOF_HEAD_SIZE)
            .filter(|body_len| body_len.checked_rem(hash_size) == Some(0))
            .ok_or(SparseMerkleError::InvalidProofSize {
                size: bytes.len(),
                hash_size,
            })?;

        let (head_bytes, body) = bytes.split_at(PROOF_HEAD_SIZE);
        let head = BigEndian::read_u64(head_bytes);
        if head.checked_shr(u32::from(depth)).is_some_and(|high| high != 0) {
            return Err(SparseMerkleError::InvalidProofHead(format!(
                "head {:#018x} marks levels beyond depth {}",
                head, depth
            )));
        }
        let slots = body_len / hash_size;
        if head.count_ones() as usize != slots {
            return Err(SparseMerkleError::InvalidProofHead(format!(
                "head marks {} siblings but body holds {}",
                head.count_ones(),
                slots
            )));
        }

        let siblings = body.chunks_exact(hash_size).map(<[u8]>::to_vec).collect();
        Ok(Self { head, siblings })
    }

    /// The head bitmap.
    pub fn head(&self) -> u64 {
        self.head
    }

    /// Whether the sibling `bit` levels above the leaf is carried in the body.
    pub fn is_set(&self, bit: u8) -> bool {
        bit < 64 && self.head & (1u64 << bit) != 0
    }

    /// Non-default siblings, leaf to root.
    pub fn siblings(&self) -> &[Vec<u8>] {
        &self.siblings
    }

    /// Number of siblings carried, equal to `popcount(head)`.
    pub fn sibling_count(&self) -> usize {
        self.siblings.len()
    }

    /// Length of [`encode_to_vec`](Self::encode_to_vec)'s output.
    pub fn encoded_len(&self) -> usize {
        PROOF_HEAD_SIZE + self.siblings.iter().map(Vec::len).sum::<usize>()
    }
}
