//! Property-based tests for DAG invariants.
//!
//! These tests verify the behavioral contracts of the graph:
//! - Edge count always matches the degree sums
//! - Accepted edges keep the graph acyclic, rejected edges change nothing
//! - Node deletion removes every incident edge
//! - Topological sort respects all edges
//! - LCA is symmetric and is a common ancestor of both query nodes

#![allow(clippy::unwrap_used, clippy::expect_used)]

use ancestry_dag::{Dag, NodeKey};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// Generate an arbitrary edge list over `node_count` nodes.
///
/// Edges may point in any direction, so replaying them through `add_edge`
/// exercises both accepted and rejected insertions.
fn edge_list_strategy(
    node_count: u8,
    max_edges: usize,
) -> impl Strategy<Value = Vec<(u8, u8)>> {
    proptest::collection::vec((0..node_count, 0..node_count), 0..=max_edges)
}

/// Generate a DAG edge list: edges only point from lower to higher keys.
fn dag_edges_strategy(
    node_count: u8,
    max_edges: usize,
) -> impl Strategy<Value = Vec<(u8, u8)>> {
    proptest::collection::vec((0..node_count, 0..node_count), 0..=max_edges).prop_map(|edges| {
        edges
            .into_iter()
            .filter(|(from, to)| from != to)
            .map(|(from, to)| (from.min(to), from.max(to)))
            .collect()
    })
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Build a graph with nodes `0..node_count`, replaying `edges` in order.
///
/// Returns the graph and the edges that were accepted.
fn build_graph(node_count: u8, edges: &[(u8, u8)]) -> (Dag<u8, u32>, Vec<(u8, u8)>) {
    let mut dag = Dag::new();
    for key in 0..node_count {
        dag.add_node(key, u32::from(key) * 10);
    }

    let accepted = edges
        .iter()
        .copied()
        .filter(|&(from, to)| dag.add_edge(from, to))
        .collect();
    (dag, accepted)
}

/// Independent cycle check over the graph's current adjacency.
fn is_cyclic_oracle<K: NodeKey, V>(dag: &Dag<K, V>) -> bool {
    let mut graph = DiGraph::<(), ()>::new();
    let index: HashMap<&K, _> = dag.keys().map(|k| (k, graph.add_node(()))).collect();
    for node in dag.nodes() {
        for child in node.children() {
            graph.add_edge(index[node.key()], index[child], ());
        }
    }
    is_cyclic_directed(&graph)
}

/// Snapshot of everything an `add_edge` rollback must restore.
fn adjacency<K: NodeKey, V>(dag: &Dag<K, V>) -> Vec<(K, Vec<K>, Vec<K>)> {
    dag.nodes()
        .map(|n| {
            (
                n.key().clone(),
                n.parents().iter().cloned().collect(),
                n.children().iter().cloned().collect(),
            )
        })
        .collect()
}

/// All keys reachable upward from `key`, including `key`.
fn ancestors<K: NodeKey, V>(dag: &Dag<K, V>, key: &K) -> HashSet<K> {
    let mut seen = HashSet::new();
    let mut frontier = vec![key.clone()];
    while let Some(current) = frontier.pop() {
        if seen.insert(current.clone())
            && let Some(node) = dag.get(&current)
        {
            frontier.extend(node.parents().iter().cloned());
        }
    }
    seen
}

// =============================================================================
// Property Tests: Node Store
// =============================================================================

proptest! {
    /// Contract: E equals the sum of outdegrees and the sum of indegrees.
    #[test]
    fn edge_count_matches_degree_sums(
        edges in edge_list_strategy(12, 40),
        deletions in proptest::collection::vec(0..12_u8, 0..4)
    ) {
        let (mut dag, _) = build_graph(12, &edges);
        for key in &deletions {
            dag.delete_node(key);
        }

        let out_sum: isize = dag.keys().map(|k| dag.outdegree(k)).sum();
        let in_sum: isize = dag.keys().map(|k| dag.indegree(k)).sum();

        prop_assert_eq!(out_sum, in_sum);
        prop_assert_eq!(usize::try_from(out_sum).unwrap(), dag.edge_count());
    }

    /// Contract: Deleting a node removes it and every edge touching it.
    #[test]
    fn delete_node_removes_incident_edges(
        edges in edge_list_strategy(10, 30),
        victim in 0..10_u8
    ) {
        let (mut dag, _) = build_graph(10, &edges);
        let before = dag.edge_count();
        let incident = usize::try_from(dag.indegree(&victim) + dag.outdegree(&victim)).unwrap();

        prop_assert!(dag.delete_node(&victim));
        prop_assert!(!dag.is_valid_node(&victim));
        prop_assert_eq!(dag.indegree(&victim), -1);
        prop_assert_eq!(dag.edge_count(), before - incident);

        for node in dag.nodes() {
            prop_assert!(!node.children().contains(&victim));
            prop_assert!(!node.parents().contains(&victim));
        }
    }

    /// Contract: Duplicate keys never overwrite the stored value.
    #[test]
    fn duplicate_keys_are_ignored(key in any::<u8>(), first in any::<u32>(), second in any::<u32>()) {
        let mut dag = Dag::new();
        prop_assert!(dag.add_node(key, first));
        prop_assert!(!dag.add_node(key, second));
        prop_assert_eq!(dag.node_count(), 1);
        prop_assert!(dag.is_valid_node_with(&key, &first));
    }
}

// =============================================================================
// Property Tests: Cycle Guard
// =============================================================================

proptest! {
    /// Contract: Accepted edges keep the graph acyclic; rejected edges leave
    /// it unchanged.
    #[test]
    fn add_edge_never_leaves_a_cycle(edges in edge_list_strategy(10, 40)) {
        let mut dag: Dag<u8, u32> = Dag::new();
        for key in 0..10 {
            dag.add_node(key, 0);
        }

        for (from, to) in edges {
            let nodes = dag.node_count();
            let edge_count = dag.edge_count();
            let before = adjacency(&dag);

            if dag.add_edge(from, to) {
                prop_assert!(dag.is_acyclic());
                prop_assert!(dag.contains_edge(&from, &to));
            } else {
                prop_assert_eq!(dag.node_count(), nodes);
                prop_assert_eq!(dag.edge_count(), edge_count);
                prop_assert_eq!(adjacency(&dag), before);
            }
            prop_assert!(!is_cyclic_oracle(&dag));
        }
    }

    /// Contract: The guard rejects an edge exactly when it would close a cycle.
    #[test]
    fn add_edge_rejects_only_back_edges(edges in dag_edges_strategy(10, 25), from in 0..10_u8, to in 0..10_u8) {
        let (mut dag, accepted) = build_graph(10, &edges);
        prop_assert_eq!(accepted.len(), edges.len(), "forward-only edges are always accepted");

        let closes_cycle = from == to || ancestors(&dag, &from).contains(&to);
        prop_assert_eq!(dag.add_edge(from, to), !closes_cycle);
    }
}

// =============================================================================
// Property Tests: Topological Sort
// =============================================================================

proptest! {
    /// Contract: Topological sort respects all edges and includes every node.
    #[test]
    fn topological_sort_respects_edges(edges in edge_list_strategy(15, 50)) {
        let (dag, accepted) = build_graph(15, &edges);
        let sorted = dag.topological_sort();

        prop_assert_eq!(sorted.len(), dag.node_count());

        let positions: HashMap<u8, usize> =
            sorted.iter().enumerate().map(|(i, k)| (*k, i)).collect();
        prop_assert_eq!(positions.len(), sorted.len(), "no key appears twice");

        for (from, to) in accepted {
            prop_assert!(
                positions[&from] < positions[&to],
                "{} (pos {}) should come before {} (pos {})",
                from, positions[&from], to, positions[&to]
            );
        }
    }

    /// Contract: Topological sort is deterministic for the same graph.
    #[test]
    fn topological_sort_is_deterministic(edges in edge_list_strategy(10, 30)) {
        let (dag1, _) = build_graph(10, &edges);
        let (dag2, _) = build_graph(10, &edges);
        prop_assert_eq!(dag1.topological_sort(), dag2.topological_sort());
    }
}

// =============================================================================
// Property Tests: Paths and LCA
// =============================================================================

proptest! {
    /// Contract: Every root-ward path starts at the query node, follows
    /// edges upward and ends at a root.
    #[test]
    fn paths_end_at_roots(edges in dag_edges_strategy(8, 14), start in 0..8_u8) {
        let (dag, _) = build_graph(8, &edges);
        let paths = dag.paths_to_roots(&start).unwrap();
        prop_assert!(!paths.is_empty());

        for path in &paths {
            prop_assert_eq!(path.first(), Some(&start));
            for pair in path.windows(2) {
                prop_assert!(dag.contains_edge(&pair[1], &pair[0]));
            }
            let last = path.last().unwrap();
            prop_assert_eq!(dag.indegree(last), 0);
        }

        let distinct: HashSet<&Vec<u8>> = paths.iter().collect();
        prop_assert_eq!(distinct.len(), paths.len(), "paths are distinct");
    }

    /// Contract: LCA does not depend on argument order.
    #[test]
    fn lca_is_symmetric(edges in dag_edges_strategy(8, 14), a in 0..9_u8, b in 0..9_u8) {
        let (dag, _) = build_graph(8, &edges);
        prop_assert_eq!(dag.lca(&a, &b), dag.lca(&b, &a));
    }

    /// Contract: The LCA is an ancestor of both nodes, and exists whenever
    /// they share an ancestor.
    #[test]
    fn lca_is_common_ancestor(edges in dag_edges_strategy(8, 14), a in 0..8_u8, b in 0..8_u8) {
        let (dag, _) = build_graph(8, &edges);
        let shared: HashSet<u8> = ancestors(&dag, &a)
            .intersection(&ancestors(&dag, &b))
            .copied()
            .collect();

        match dag.lca(&a, &b) {
            Some(lca) => prop_assert!(shared.contains(&lca)),
            None => prop_assert!(shared.is_empty()),
        }
    }
}
