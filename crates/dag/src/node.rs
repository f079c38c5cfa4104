//! Graph nodes.

use indexmap::IndexSet;
use std::hash::Hash;

/// A node in the DAG.
///
/// Nodes refer to their neighbors by key only. Both edge sets keep edge
/// insertion order, which makes traversal output deterministic.
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    key: K,
    value: V,
    /// Keys this node has edges to.
    children: IndexSet<K>,
    /// Keys that have edges to this node.
    parents: IndexSet<K>,
}

impl<K: Hash + Eq, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            children: IndexSet::new(),
            parents: IndexSet::new(),
        }
    }

    /// The node's key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The value stored with the node.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Destinations of this node's outgoing edges, in insertion order.
    pub fn children(&self) -> &IndexSet<K> {
        &self.children
    }

    /// Sources of this node's incoming edges, in insertion order.
    pub fn parents(&self) -> &IndexSet<K> {
        &self.parents
    }

    /// Number of incoming edges.
    #[must_use]
    pub fn indegree(&self) -> usize {
        self.parents.len()
    }

    /// Number of outgoing edges.
    #[must_use]
    pub fn outdegree(&self) -> usize {
        self.children.len()
    }

    /// True if no edge enters this node.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// True if no edge leaves this node.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn add_child(&mut self, key: K) -> bool {
        self.children.insert(key)
    }

    pub(crate) fn remove_child(&mut self, key: &K) -> bool {
        self.children.shift_remove(key)
    }

    pub(crate) fn add_parent(&mut self, key: K) -> bool {
        self.parents.insert(key)
    }

    pub(crate) fn remove_parent(&mut self, key: &K) -> bool {
        self.parents.shift_remove(key)
    }
}
