//! Traversal algorithms: topological ordering and root-ward path enumeration.
//!
//! Both walks use an explicit work stack, so their stack usage does not
//! depend on the depth of the graph.

use crate::{Dag, Error, NodeKey, Result};
use std::fmt::{Display, Write};
use tracing::warn;

/// Keys in an order where every edge's source precedes its destination.
pub type TopologicalOrder<K> = Vec<K>;

/// A directed path from a start node upward to a root, start node first.
pub type RootPath<K> = Vec<K>;

impl<K: NodeKey, V> Dag<K, V> {
    /// Get all keys in topological order (sources before sinks).
    ///
    /// Depth-first: nodes are started in insertion order, children are
    /// visited in edge insertion order, and the result is the reverse of the
    /// order in which nodes finish.
    #[must_use]
    pub fn topological_sort(&self) -> TopologicalOrder<K> {
        let size = self.nodes.len();
        let mut visited = vec![false; size];
        let mut finished = Vec::with_capacity(size);
        // (node index, position of the next child to visit)
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for start in 0..size {
            if visited[start] {
                continue;
            }
            visited[start] = true;
            stack.push((start, 0));

            while let Some(frame) = stack.last_mut() {
                let (index, cursor) = *frame;
                frame.1 += 1;

                match self.nodes[index].children().get_index(cursor) {
                    Some(child) => {
                        if let Some(child_index) = self.nodes.get_index_of(child)
                            && !visited[child_index]
                        {
                            visited[child_index] = true;
                            stack.push((child_index, 0));
                        }
                    }
                    None => {
                        stack.pop();
                        finished.push(index);
                    }
                }
            }
        }

        finished
            .into_iter()
            .rev()
            .filter_map(|index| self.nodes.get_index(index).map(|(key, _)| key.clone()))
            .collect()
    }

    /// Render the topological order with every key followed by a space.
    #[must_use]
    pub fn topological_sort_string(&self) -> String
    where
        K: Display,
    {
        self.topological_sort()
            .iter()
            .fold(String::new(), |mut out, key| {
                let _ = write!(out, "{key} ");
                out
            })
    }

    /// Enumerate every path from `start` up to a root.
    ///
    /// Returns `None` for an unknown key, or when the configured
    /// [`max_paths`](crate::DagConfig::max_paths) budget is exceeded.
    #[must_use]
    pub fn paths_to_roots(&self, start: &K) -> Option<Vec<RootPath<K>>> {
        self.try_paths_to_roots(start).ok()
    }

    /// Enumerate every path from `start` up to a root.
    ///
    /// At each node the path continues in place through the first parent;
    /// every further parent branches off a copy of the path so far. A path
    /// ends at a node without parents. Paths are returned in the order they
    /// branch off: a branch is fully expanded before any branch point nearer
    /// to `start` is revisited.
    ///
    /// The number of paths can be exponential in the number of merge points.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if `start` does not exist, or
    /// [`Error::PathLimitExceeded`] if more than `max_paths` paths exist.
    pub fn try_paths_to_roots(&self, start: &K) -> Result<Vec<RootPath<K>>> {
        if !self.contains(start) {
            return Err(Error::unknown_node(start));
        }

        let mut paths = Vec::new();
        let mut pending: Vec<(RootPath<K>, K)> = vec![(Vec::new(), start.clone())];

        while let Some((mut path, mut current)) = pending.pop() {
            if let Some(limit) = self.config.max_paths
                && paths.len() >= limit
            {
                warn!("Path budget of {} exceeded from {:?}", limit, start);
                return Err(Error::path_limit_exceeded(start, limit));
            }

            let mut branches = Vec::new();
            loop {
                path.push(current.clone());
                let Some(node) = self.nodes.get(&current) else {
                    break;
                };
                let mut parents = node.parents().iter();
                let Some(first) = parents.next() else {
                    break;
                };
                // Reversed so the earliest sibling is popped first.
                for parent in parents.rev() {
                    branches.push((path.clone(), parent.clone()));
                }
                current = first.clone();
            }

            // Branches nearest the root end up on top of the stack.
            pending.extend(branches);
            paths.push(path);
        }

        Ok(paths)
    }
}
