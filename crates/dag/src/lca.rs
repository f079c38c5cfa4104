//! Lowest common ancestor over all root-ward paths.
//!
//! In a DAG a node can reach several roots through several parents, so the
//! LCA is resolved over path sets: every root-ward path of one query node is
//! intersected with every root-ward path of the other, and the longest
//! intersection wins. Paths run from the query node outward, so the first
//! key of the longest intersection is the shared node furthest from any
//! root.
//!
//! Cost is `O(P1 * P2 * L)` for path counts `P1`, `P2` and path length `L`.
//! Graphs with many merge points should set
//! [`DagConfig::max_paths`](crate::DagConfig::max_paths).

use crate::{Dag, Error, NodeKey, Result};
use std::collections::HashSet;

impl<K: NodeKey, V> Dag<K, V> {
    /// Find the lowest common ancestor of two nodes.
    ///
    /// A node counts as its own ancestor. Returns `None` if either key is
    /// unknown, if the two nodes share no ancestor, or if the path budget is
    /// exceeded.
    #[must_use]
    pub fn lca(&self, first: &K, second: &K) -> Option<K> {
        self.try_lca(first, second).ok().flatten()
    }

    /// Find the lowest common ancestor of two nodes.
    ///
    /// Returns `Ok(None)` when both nodes exist but share no ancestor.
    /// Among equally long intersections the first one found wins; the scan
    /// is always driven by the smaller key, so the result does not depend on
    /// argument order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if either key does not exist, or
    /// [`Error::PathLimitExceeded`] if either node has more root-ward paths
    /// than the configured budget.
    pub fn try_lca(&self, first: &K, second: &K) -> Result<Option<K>> {
        for key in [first, second] {
            if !self.contains(key) {
                return Err(Error::unknown_node(key));
            }
        }

        let (outer, inner) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };

        let outer_paths = self.try_paths_to_roots(outer)?;
        let inner_paths = self.try_paths_to_roots(inner)?;
        let inner_sets: Vec<HashSet<&K>> = inner_paths
            .iter()
            .map(|path| path.iter().collect())
            .collect();

        let mut deepest: Option<Vec<&K>> = None;
        for path in &outer_paths {
            for inner_set in &inner_sets {
                let common = intersection(path, inner_set);
                if deepest.as_ref().is_none_or(|best| common.len() > best.len()) {
                    deepest = Some(common);
                }
            }
        }

        Ok(deepest.and_then(|common| common.first().map(|key| (*key).clone())))
    }
}

/// Keys of `path` that also appear in `other`, in `path` order, each once.
fn intersection<'a, K: NodeKey>(path: &'a [K], other: &HashSet<&K>) -> Vec<&'a K> {
    let mut seen = HashSet::new();
    path.iter()
        .filter(|key| other.contains(key) && seen.insert(*key))
        .collect()
}
