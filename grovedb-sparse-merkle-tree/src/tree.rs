use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    DefaultNodes, NodeHasher, SparseMerkleError, TreeConfig,
    config::{check_index, max_index, validate_depth},
    hash::{hash_leaf, hash_pair},
    levels::LevelStore,
    proof::SparseTreeProof,
};

/// A fixed-depth sparse Merkle tree over the index space `[0, 2^depth)`.
///
/// Built once from a sparse set of leaves and immutable afterwards. Level 0
/// holds the root and level `depth` holds the leaves. Only ancestors of
/// supplied leaves are materialized; everything else resolves to the
/// per-level default node.
///
/// The tree owns its digest engine. Operations that hash (construction and
/// verification) therefore need exclusive access, while [`root`](Self::root)
/// and proof creation only read.
#[derive(Debug, Clone)]
pub struct SparseMerkleTree<H> {
    hasher: H,
    depth: u8,
    hash_size: usize,
    defaults: DefaultNodes,
    levels: LevelStore,
    leaf_count: usize,
}

impl<H: NodeHasher> SparseMerkleTree<H> {
    /// Build a tree of the given depth from a sparse `index -> value` map.
    ///
    /// Leaf digests are `H(value)`. If an index appears more than once the
    /// last value wins. Costs `O(leaves * depth)` hashes.
    ///
    /// Fails with `TooLargeTreeDepth` if depth exceeds 64 and with
    /// `TooLargeLeafIndex` if any index is `>= 2^depth`. Engine failures abort
    /// construction and no tree is returned.
    pub fn new<I, V>(mut hasher: H, depth: u8, leaves: I) -> Result<Self, SparseMerkleError>
    where
        I: IntoIterator<Item = (u64, V)>,
        V: AsRef<[u8]>,
    {
        validate_depth(depth)?;

        let leaves: BTreeMap<u64, V> = leaves.into_iter().collect();
        if let Some(&largest) = leaves.keys().next_back() {
            check_index(depth, largest)?;
        }

        let defaults = DefaultNodes::compute(&mut hasher, depth)?;
        let mut levels = LevelStore::new(depth);
        for (index, value) in &leaves {
            let node = hash_leaf(&mut hasher, value.as_ref())?;
            levels.insert(depth, *index, node);
        }

        for level in (1..=depth).rev() {
            let mut parents = Vec::with_capacity(levels.level(level).len());
            for (&index, node) in levels.level(level) {
                let parent = if index % 2 == 0 {
                    let sibling = levels.lookup(level, index + 1, &defaults);
                    hash_pair(&mut hasher, node, sibling)?
                } else if levels.contains(level, index - 1) {
                    // Computed when the even sibling was visited.
                    continue;
                } else {
                    hash_pair(&mut hasher, defaults.get(level), node)?
                };
                parents.push((index / 2, parent));
            }
            for (index, parent) in parents {
                levels.insert(level - 1, index, parent);
            }
        }

        let tree = Self {
            hash_size: hasher.output_size(),
            hasher,
            depth,
            defaults,
            levels,
            leaf_count: leaves.len(),
        };
        debug!(
            depth,
            leaves = tree.leaf_count,
            explicit_nodes = tree.levels.node_count(),
            "built sparse merkle tree"
        );
        Ok(tree)
    }

    /// Build a tree from a validated [`TreeConfig`].
    pub fn from_config<I, V>(config: TreeConfig<H>, leaves: I) -> Result<Self, SparseMerkleError>
    where
        I: IntoIterator<Item = (u64, V)>,
        V: AsRef<[u8]>,
    {
        let (hasher, depth) = config.into_parts();
        Self::new(hasher, depth, leaves)
    }

    /// Create an encoded membership proof for `index`.
    ///
    /// The proof is valid whether or not a leaf was supplied at `index`; for
    /// an absent index it is a non-inclusion proof.
    pub fn create_membership_proof(&self, index: u64) -> Result<Vec<u8>, SparseMerkleError> {
        Ok(SparseTreeProof::generate(self, index)?.encode_to_vec())
    }

    /// Split borrow for verification: the engine mutably, the defaults shared.
    pub(crate) fn hasher_and_defaults(&mut self) -> (&mut H, &DefaultNodes) {
        (&mut self.hasher, &self.defaults)
    }
}

impl<H> SparseMerkleTree<H> {
    /// The root digest: the explicit level-0 node, or the empty-tree default.
    pub fn root(&self) -> &[u8] {
        self.node(0, 0)
    }

    /// Number of levels between the root and the leaves.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Digest length of the engine the tree was built with.
    pub fn hash_size(&self) -> usize {
        self.hash_size
    }

    /// Largest valid leaf index, `2^depth - 1`.
    pub fn max_index(&self) -> u64 {
        max_index(self.depth)
    }

    /// Number of distinct leaves supplied at construction.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of materialized nodes across all levels, leaves included.
    pub fn explicit_node_count(&self) -> usize {
        self.levels.node_count()
    }

    /// Whether a leaf was supplied at `index`.
    pub fn contains_leaf(&self, index: u64) -> bool {
        self.levels.contains(self.depth, index)
    }

    /// The leaf digest at `index`, explicit or default.
    pub fn leaf_node(&self, index: u64) -> Result<&[u8], SparseMerkleError> {
        check_index(self.depth, index)?;
        Ok(self.node(self.depth, index))
    }

    /// Default digest of an empty subtree rooted at `level`, if `level` is
    /// within the tree.
    pub fn default_node(&self, level: u8) -> Option<&[u8]> {
        (level <= self.depth).then(|| self.defaults.get(level))
    }

    /// The whole default node table.
    pub fn default_nodes(&self) -> &DefaultNodes {
        &self.defaults
    }

    /// Node at `(level, index)`, explicit or default.
    pub(crate) fn node(&self, level: u8, index: u64) -> &[u8] {
        self.levels.lookup(level, index, &self.defaults)
    }

    /// Explicit node at `(level, index)` only.
    pub(crate) fn explicit_node(&self, level: u8, index: u64) -> Option<&[u8]> {
        self.levels.get(level, index)
    }
}
