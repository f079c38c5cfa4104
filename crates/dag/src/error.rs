//! Error types for DAG operations.
//!
//! Only the fallible (`try_*`) surface returns these. The sentinel surface
//! (`add_edge`, `lca`, `indegree`, ...) collapses every expected failure into
//! `false`, `None` or `-1`.

use thiserror::Error;

/// Result type for DAG operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during DAG operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A key does not name a node in the graph.
    #[error("Unknown node {key}")]
    UnknownNode {
        /// Debug rendering of the missing key.
        key: String,
    },

    /// Adding the edge would have closed a cycle, so it was rolled back.
    #[error("Edge {from} -> {to} would create a cycle")]
    CycleDetected {
        /// Debug rendering of the source key.
        from: String,
        /// Debug rendering of the destination key.
        to: String,
    },

    /// Enumerating root-ward paths exceeded the configured budget.
    #[error("Node {key} has more than {limit} paths to a root")]
    PathLimitExceeded {
        /// Debug rendering of the start key.
        key: String,
        /// The configured `max_paths` value.
        limit: usize,
    },

    /// Configuration could not be parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration problem.
        message: String,
    },
}

impl Error {
    /// Create an unknown-node error from any debuggable key.
    #[must_use]
    pub fn unknown_node(key: &impl std::fmt::Debug) -> Self {
        Self::UnknownNode {
            key: format!("{key:?}"),
        }
    }

    /// Create a cycle error for the rejected edge `from -> to`.
    #[must_use]
    pub fn cycle_detected(from: &impl std::fmt::Debug, to: &impl std::fmt::Debug) -> Self {
        Self::CycleDetected {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }

    /// Create a path-budget error for the given start key.
    #[must_use]
    pub fn path_limit_exceeded(key: &impl std::fmt::Debug, limit: usize) -> Self {
        Self::PathLimitExceeded {
            key: format!("{key:?}"),
            limit,
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
