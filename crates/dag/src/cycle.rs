//! Acyclicity check by repeated leaf removal.
//!
//! A leaf here is a sink: a node with no outgoing edges. A finite graph is
//! acyclic exactly when it can be emptied by repeatedly deleting a leaf
//! together with the edges into it. The check works on an integer-handle
//! snapshot, never on the live graph.

use crate::{Dag, NodeKey};
use petgraph::Direction::{Incoming, Outgoing};
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::trace;

/// Index-based snapshot of a graph's edge structure.
///
/// Node handles are positions in the owning [`Dag`]'s insertion order; keys
/// and values are not copied.
pub(crate) struct CycleGuard {
    graph: DiGraph<(), ()>,
}

impl CycleGuard {
    /// Snapshot the edge structure of `dag`.
    pub(crate) fn snapshot<K: NodeKey, V>(dag: &Dag<K, V>) -> Self {
        let mut graph = DiGraph::with_capacity(dag.node_count(), dag.edge_count());
        for _ in 0..dag.node_count() {
            graph.add_node(());
        }

        for (from, node) in dag.nodes.values().enumerate() {
            for child in node.children() {
                if let Some(to) = dag.nodes.get_index_of(child) {
                    graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
                }
            }
        }

        Self { graph }
    }

    /// Consume the snapshot, removing leaves until it is empty or leafless.
    pub(crate) fn is_acyclic(self) -> bool {
        let graph = &self.graph;
        let size = graph.node_count();

        let mut outdegree: Vec<usize> = graph
            .node_indices()
            .map(|ix| graph.neighbors_directed(ix, Outgoing).count())
            .collect();
        let mut leaves: Vec<NodeIndex> = graph
            .node_indices()
            .filter(|ix| outdegree[ix.index()] == 0)
            .collect();
        let mut remaining = size;

        // Each pass removes one node, so N + 1 passes always reach a verdict.
        for _ in 0..=size {
            if remaining == 0 {
                trace!("Cycle guard: acyclic ({} nodes)", size);
                return true;
            }
            let Some(leaf) = leaves.pop() else {
                trace!("Cycle guard: no leaf among {} remaining nodes", remaining);
                return false;
            };
            remaining -= 1;

            for parent in graph.neighbors_directed(leaf, Incoming) {
                let degree = &mut outdegree[parent.index()];
                *degree -= 1;
                if *degree == 0 {
                    leaves.push(parent);
                }
            }
        }

        false
    }
}

impl<K: NodeKey, V> Dag<K, V> {
    /// Check that the graph contains no directed cycle.
    ///
    /// Always true for a graph only mutated through this API; exposed for
    /// verification.
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        CycleGuard::snapshot(self).is_acyclic()
    }
}
