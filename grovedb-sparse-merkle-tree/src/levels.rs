use std::collections::BTreeMap;

use crate::DefaultNodes;

/// Explicitly known node digests, one ordered map per level.
///
/// Only ancestors of supplied leaves are stored. Every other position is
/// implicitly the default node of its level; [`lookup`](Self::lookup) is the
/// single place that fallback is applied.
#[derive(Debug, Clone)]
pub(crate) struct LevelStore {
    levels: Vec<BTreeMap<u64, Vec<u8>>>,
}

impl LevelStore {
    /// Empty store for levels `0..=depth`.
    pub(crate) fn new(depth: u8) -> Self {
        Self {
            levels: vec![BTreeMap::new(); usize::from(depth) + 1],
        }
    }

    /// The explicit digest at `(level, index)`, if one was stored.
    pub(crate) fn get(&self, level: u8, index: u64) -> Option<&[u8]> {
        self.levels[usize::from(level)]
            .get(&index)
            .map(Vec::as_slice)
    }

    /// The digest at `(level, index)`, falling back to the level default.
    pub(crate) fn lookup<'a>(
        &'a self,
        level: u8,
        index: u64,
        defaults: &'a DefaultNodes,
    ) -> &'a [u8] {
        self.get(level, index)
            .unwrap_or_else(|| defaults.get(level))
    }

    pub(crate) fn contains(&self, level: u8, index: u64) -> bool {
        self.levels[usize::from(level)].contains_key(&index)
    }

    pub(crate) fn insert(&mut self, level: u8, index: u64, node: Vec<u8>) {
        self.levels[usize::from(level)].insert(index, node);
    }

    /// Explicit entries of one level in ascending index order.
    pub(crate) fn level(&self, level: u8) -> &BTreeMap<u64, Vec<u8>> {
        &self.levels[usize::from(level)]
    }

    /// Number of explicit nodes across all levels.
    pub(crate) fn node_count(&self) -> usize {
        self.levels.iter().map(BTreeMap::len).sum()
    }
}
