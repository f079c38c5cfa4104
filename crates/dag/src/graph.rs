//! Node store and cycle-guarded edge insertion.
//!
//! The graph owns every [`Node`] in an insertion-ordered hash index. Nodes
//! reference each other by key only, so removing a node can never leave a
//! live handle behind, only a key that no longer resolves.

use crate::cycle::CycleGuard;
use crate::{DagConfig, Error, Node, NodeKey, Result};
use indexmap::IndexMap;
use tracing::{debug, trace};

/// A directed acyclic graph of keyed nodes.
///
/// Mutations are validated before they become visible: [`Dag::add_edge`]
/// inserts speculatively, runs the cycle guard, and rolls back if the edge
/// would close a cycle.
#[derive(Debug, Clone)]
pub struct Dag<K, V> {
    /// All nodes, in insertion order.
    pub(crate) nodes: IndexMap<K, Node<K, V>>,
    /// Total number of edges.
    edge_count: usize,
    pub(crate) config: DagConfig,
}

impl<K: NodeKey, V> Dag<K, V> {
    /// Create a new empty graph with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DagConfig::default())
    }

    /// Create a new empty graph with the given configuration.
    #[must_use]
    pub fn with_config(config: DagConfig) -> Self {
        Self {
            nodes: IndexMap::new(),
            edge_count: 0,
            config,
        }
    }

    /// The configuration this graph was built with.
    #[must_use]
    pub fn config(&self) -> &DagConfig {
        &self.config
    }

    /// Add a node.
    ///
    /// If a node with the same key already exists the call is a no-op: the
    /// existing value is kept and `false` is returned.
    pub fn add_node(&mut self, key: K, value: V) -> bool {
        if self.nodes.contains_key(&key) {
            trace!("Ignoring duplicate node {:?}", key);
            return false;
        }

        debug!("Added node {:?}", key);
        self.nodes.insert(key.clone(), Node::new(key, value));
        true
    }

    /// Get a node by key.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&Node<K, V>> {
        self.nodes.get(key)
    }

    /// Check if a node exists.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.nodes.contains_key(key)
    }

    /// Check if a node exists. Alias of [`Dag::contains`].
    #[must_use]
    pub fn is_valid_node(&self, key: &K) -> bool {
        self.contains(key)
    }

    /// Check if a node exists and holds exactly `value`.
    #[must_use]
    pub fn is_valid_node_with(&self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.nodes.get(key).is_some_and(|node| node.value() == value)
    }

    /// Delete a node and every edge into or out of it.
    ///
    /// Returns `true` if the node existed.
    pub fn delete_node(&mut self, key: &K) -> bool {
        let Some(node) = self.nodes.shift_remove(key) else {
            return false;
        };

        for parent in node.parents() {
            if let Some(parent) = self.nodes.get_mut(parent) {
                parent.remove_child(key);
            }
        }
        for child in node.children() {
            if let Some(child) = self.nodes.get_mut(child) {
                child.remove_parent(key);
            }
        }

        let removed = node.indegree() + node.outdegree();
        self.edge_count -= removed;
        debug!("Deleted node {:?} and {} edges", key, removed);
        true
    }

    /// Number of incoming edges, or `None` for an unknown key.
    #[must_use]
    pub fn in_degree(&self, key: &K) -> Option<usize> {
        self.nodes.get(key).map(Node::indegree)
    }

    /// Number of outgoing edges, or `None` for an unknown key.
    #[must_use]
    pub fn out_degree(&self, key: &K) -> Option<usize> {
        self.nodes.get(key).map(Node::outdegree)
    }

    /// Number of incoming edges, or `-1` for an unknown key.
    #[must_use]
    pub fn indegree(&self, key: &K) -> isize {
        self.in_degree(key).map_or(-1, degree_sentinel)
    }

    /// Number of outgoing edges, or `-1` for an unknown key.
    #[must_use]
    pub fn outdegree(&self, key: &K) -> isize {
        self.out_degree(key).map_or(-1, degree_sentinel)
    }

    /// Number of nodes (`N`).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges (`E`).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// True if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.nodes.keys()
    }

    /// Iterate over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<K, V>> {
        self.nodes.values()
    }

    /// Iterate over nodes with no incoming edges.
    pub fn roots(&self) -> impl Iterator<Item = &K> {
        self.nodes.values().filter(|n| n.is_root()).map(Node::key)
    }

    /// Iterate over nodes with no outgoing edges.
    pub fn leaves(&self) -> impl Iterator<Item = &K> {
        self.nodes.values().filter(|n| n.is_leaf()).map(Node::key)
    }

    /// Check if the edge `from -> to` exists.
    #[must_use]
    pub fn contains_edge(&self, from: &K, to: &K) -> bool {
        self.nodes
            .get(from)
            .is_some_and(|node| node.children().contains(to))
    }

    /// Add the edge `from -> to`, keeping the graph acyclic.
    ///
    /// Returns `false` if either endpoint is unknown or the edge would create
    /// a cycle; the graph is unchanged in both cases. Adding an edge that
    /// already exists succeeds without changing anything.
    pub fn add_edge(&mut self, from: K, to: K) -> bool {
        self.try_add_edge(from, to).is_ok()
    }

    /// Add the edge `from -> to`, keeping the graph acyclic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if either endpoint does not exist, or
    /// [`Error::CycleDetected`] if the edge would close a cycle. The graph is
    /// unchanged when an error is returned.
    pub fn try_add_edge(&mut self, from: K, to: K) -> Result<()> {
        if !self.contains(&from) {
            return Err(Error::unknown_node(&from));
        }
        if !self.contains(&to) {
            return Err(Error::unknown_node(&to));
        }
        if self.contains_edge(&from, &to) {
            trace!("Edge {:?} -> {:?} already present", from, to);
            return Ok(());
        }

        self.insert_edge(&from, &to);

        if CycleGuard::snapshot(self).is_acyclic() {
            debug!("Added edge {:?} -> {:?}", from, to);
            Ok(())
        } else {
            self.remove_edge(&from, &to);
            debug!("Rejected edge {:?} -> {:?}: would create a cycle", from, to);
            Err(Error::cycle_detected(&from, &to))
        }
    }

    /// Insert an edge between two existing nodes without validation.
    fn insert_edge(&mut self, from: &K, to: &K) {
        if let Some(source) = self.nodes.get_mut(from) {
            source.add_child(to.clone());
        }
        if let Some(dest) = self.nodes.get_mut(to) {
            dest.add_parent(from.clone());
        }
        self.edge_count += 1;
    }

    /// Exact inverse of [`Dag::insert_edge`] for the most recently inserted edge.
    fn remove_edge(&mut self, from: &K, to: &K) {
        if let Some(source) = self.nodes.get_mut(from) {
            source.remove_child(to);
        }
        if let Some(dest) = self.nodes.get_mut(to) {
            dest.remove_parent(from);
        }
        self.edge_count -= 1;
    }
}

impl<K: NodeKey, V> Default for Dag<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::cast_possible_wrap)]
fn degree_sentinel(degree: usize) -> isize {
    degree as isize
}
