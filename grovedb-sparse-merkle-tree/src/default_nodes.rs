use crate::{
    NodeHasher, SparseMerkleError,
    config::validate_depth,
    hash::{hash_leaf, hash_pair},
};

/// Digests of empty subtrees, one per level.
///
/// `nodes[depth]` is the hash of a zero block of `hash_size` bytes and every
/// shallower entry is the hash of the deeper one concatenated with itself.
/// The table depends only on the engine and the depth, never on leaf data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultNodes {
    nodes: Vec<Vec<u8>>,
}

impl DefaultNodes {
    /// Compute the table for levels `0..=depth`. Costs `depth + 1` hashes.
    pub fn compute<H: NodeHasher + ?Sized>(
        hasher: &mut H,
        depth: u8,
    ) -> Result<Self, SparseMerkleError> {
        validate_depth(depth)?;
        let zero_block = vec![0u8; hasher.output_size()];
        let mut nodes = Vec::with_capacity(usize::from(depth) + 1);
        let mut node = hash_leaf(hasher, &zero_block)?;
        for _ in 0..depth {
            let parent = hash_pair(hasher, &node, &node)?;
            nodes.push(node);
            node = parent;
        }
        nodes.push(node);
        // Built leaf-first; index by level from the root.
        nodes.reverse();
        Ok(Self { nodes })
    }

    /// Default digest at `level`, where level 0 is the root.
    ///
    /// # Panics
    ///
    /// Panics if `level` exceeds the depth the table was built for.
    pub fn get(&self, level: u8) -> &[u8] {
        &self.nodes[usize::from(level)]
    }

    /// The empty-tree root, `nodes[0]`.
    pub fn root(&self) -> &[u8] {
        self.get(0)
    }

    /// Depth the table was built for.
    pub fn depth(&self) -> u8 {
        // At most 65 entries, so the cast cannot truncate.
        (self.nodes.len() - 1) as u8
    }
}
