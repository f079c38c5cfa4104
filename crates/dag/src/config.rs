//! Configuration for DAG queries.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tunables for a [`Dag`](crate::Dag).
///
/// The defaults reproduce unbounded reference behavior. Every field is
/// optional when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DagConfig {
    /// Upper bound on root-ward paths enumerated for one query node.
    ///
    /// Path counts grow exponentially with the number of merge points, so
    /// callers holding wide DAGs can cap the work an LCA query does.
    /// `None` means unbounded.
    pub max_paths: Option<usize>,
}

impl DagConfig {
    /// Parse a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the input is not valid JSON or contains
    /// unknown fields.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| Error::config(e.to_string()))
    }

    /// Set the path budget.
    #[must_use]
    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = Some(max_paths);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        assert_eq!(DagConfig::default().max_paths, None);
    }

    #[test]
    fn test_from_json() {
        let config = DagConfig::from_json(r#"{"maxPaths": 64}"#).unwrap();
        assert_eq!(config.max_paths, Some(64));

        let config = DagConfig::from_json("{}").unwrap();
        assert_eq!(config, DagConfig::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let err = DagConfig::from_json(r#"{"maxDepth": 3}"#).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(DagConfig::from_json("max_paths = 3").is_err());
    }

    #[test]
    fn test_with_max_paths() {
        let config = DagConfig::default().with_max_paths(8);
        assert_eq!(config.max_paths, Some(8));
    }
}
