//! Fixed-depth sparse Merkle tree.
//!
//! A tree of depth `d` commits to an assignment of byte strings to the index
//! space `[0, 2^d)` (`d <= 64`). Only supplied leaves and their ancestors are
//! materialized; every other node is the precomputed digest of an empty
//! subtree at its level:
//!
//! - leaves hash as `H(value)`,
//! - internal nodes hash as `H(left || right)`,
//! - the empty leaf is `H(0^hash_size)` and each empty level above it hashes
//!   the level below with itself.
//!
//! Proofs carry an 8-byte bitmap head plus only the non-default siblings on
//! the path, so a proof for index `i` costs `8 + hash_size * popcount(head)`
//! bytes. The same proof format serves as an inclusion proof for supplied
//! indices and as a non-inclusion proof for absent ones.
//!
//! The digest engine is injected through [`NodeHasher`]; [`DigestHasher`]
//! adapts RustCrypto digests such as SHA-256 and [`Blake3Hasher`] wraps
//! Blake3.

#![warn(missing_docs)]

pub(crate) mod config;
mod default_nodes;
mod error;
pub(crate) mod hash;
pub(crate) mod levels;
pub(crate) mod proof;
pub(crate) mod tree;
mod verify;


pub use config::{DEPTH_MAX, PROOF_HEAD_SIZE, TreeConfig, max_index};
pub use default_nodes::DefaultNodes;
pub use error::SparseMerkleError;
#[cfg(feature = "blake3")]
pub use hash::Blake3Hasher;
#[cfg(feature = "sha2")]
pub use hash::DigestHasher;
pub use hash::NodeHasher;
pub use proof::SparseTreeProof;
pub use tree::SparseMerkleTree;
pub use verify::compute_root;
