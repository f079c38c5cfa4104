//! Directed acyclic graph with cycle-guarded mutation and multi-parent
//! lowest common ancestor queries.
//!
//! Nodes are stored by key with an opaque value. Every edge insertion is
//! validated by a leaf-removal cycle check and rolled back if it would close
//! a cycle, so the graph is acyclic at every point a caller can observe it.
//!
//! # Key Types
//!
//! - [`Dag`]: The graph, its mutation operations and queries
//! - [`Node`]: A node record with its parent and child key sets
//! - [`DagConfig`]: Query tunables (path budget)
//! - [`SharedDag`]: A lock-protected handle for multi-threaded use
//!
//! # Example
//!
//! ```
//! use ancestry_dag::Dag;
//!
//! let mut dag = Dag::new();
//! for (key, value) in [(1, 'a'), (2, 'b'), (3, 'c'), (4, 'd')] {
//!     dag.add_node(key, value);
//! }
//! assert!(dag.add_edge(1, 2));
//! assert!(dag.add_edge(1, 3));
//! assert!(dag.add_edge(2, 4));
//! assert!(dag.add_edge(3, 4));
//!
//! // Closing a cycle is refused and leaves the graph untouched.
//! assert!(!dag.add_edge(4, 1));
//! assert_eq!(dag.edge_count(), 4);
//!
//! assert_eq!(dag.lca(&2, &3), Some(1));
//! assert_eq!(dag.lca(&4, &2), Some(2));
//! assert_eq!(dag.topological_sort(), vec![1, 3, 2, 4]);
//! ```

mod config;
mod cycle;
mod error;
mod graph;
mod lca;
mod node;
mod sync;
mod traversal;

pub use config::DagConfig;
pub use error::{Error, Result};
pub use graph::Dag;
pub use node::Node;
pub use sync::SharedDag;
pub use traversal::{RootPath, TopologicalOrder};

use std::fmt::Debug;
use std::hash::Hash;

/// Bounds a type must satisfy to be used as a node key.
///
/// Keys must be unique and totally ordered. The ordering is used to make
/// LCA queries symmetric. `Debug` is used when a key is reported in an
/// [`Error`] or a log event.
///
/// Implemented for every type with the required bounds.
pub trait NodeKey: Clone + Eq + Hash + Ord + Debug {}

impl<T> NodeKey for T where T: Clone + Eq + Hash + Ord + Debug {}
