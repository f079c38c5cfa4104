//! Thread-safe handle around a [`Dag`].
//!
//! One exclusive writer lock covers every mutation, so the speculative
//! insert and rollback inside [`Dag::add_edge`] is never visible to a
//! reader. Queries share the read lock.

use crate::{Dag, DagConfig, NodeKey, Result, TopologicalOrder};
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable, lock-protected [`Dag`].
#[derive(Debug)]
pub struct SharedDag<K, V> {
    inner: Arc<RwLock<Dag<K, V>>>,
}

impl<K, V> Clone for SharedDag<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: NodeKey, V> SharedDag<K, V> {
    /// Create a new empty shared graph.
    #[must_use]
    pub fn new() -> Self {
        Self::from_dag(Dag::new())
    }

    /// Create a new empty shared graph with the given configuration.
    #[must_use]
    pub fn with_config(config: DagConfig) -> Self {
        Self::from_dag(Dag::with_config(config))
    }

    /// Wrap an existing graph.
    #[must_use]
    pub fn from_dag(dag: Dag<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(dag)),
        }
    }

    /// Run `f` with shared access to the graph.
    pub fn read<R>(&self, f: impl FnOnce(&Dag<K, V>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access to the graph.
    pub fn write<R>(&self, f: impl FnOnce(&mut Dag<K, V>) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// See [`Dag::add_node`].
    pub fn add_node(&self, key: K, value: V) -> bool {
        self.inner.write().add_node(key, value)
    }

    /// See [`Dag::delete_node`].
    pub fn delete_node(&self, key: &K) -> bool {
        self.inner.write().delete_node(key)
    }

    /// See [`Dag::add_edge`].
    pub fn add_edge(&self, from: K, to: K) -> bool {
        self.inner.write().add_edge(from, to)
    }

    /// See [`Dag::try_add_edge`].
    ///
    /// # Errors
    ///
    /// Same as [`Dag::try_add_edge`].
    pub fn try_add_edge(&self, from: K, to: K) -> Result<()> {
        self.inner.write().try_add_edge(from, to)
    }

    /// See [`Dag::contains`].
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    /// See [`Dag::indegree`].
    #[must_use]
    pub fn indegree(&self, key: &K) -> isize {
        self.inner.read().indegree(key)
    }

    /// See [`Dag::outdegree`].
    #[must_use]
    pub fn outdegree(&self, key: &K) -> isize {
        self.inner.read().outdegree(key)
    }

    /// See [`Dag::node_count`].
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.inner.read().node_count()
    }

    /// See [`Dag::edge_count`].
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.read().edge_count()
    }

    /// See [`Dag::is_acyclic`].
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        self.inner.read().is_acyclic()
    }

    /// See [`Dag::topological_sort`].
    #[must_use]
    pub fn topological_sort(&self) -> TopologicalOrder<K> {
        self.inner.read().topological_sort()
    }

    /// See [`Dag::lca`].
    #[must_use]
    pub fn lca(&self, first: &K, second: &K) -> Option<K> {
        self.inner.read().lca(first, second)
    }

    /// See [`Dag::try_lca`].
    ///
    /// # Errors
    ///
    /// Same as [`Dag::try_lca`].
    pub fn try_lca(&self, first: &K, second: &K) -> Result<Option<K>> {
        self.inner.read().try_lca(first, second)
    }
}

impl<K: NodeKey, V> Default for SharedDag<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
