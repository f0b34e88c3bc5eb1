//! Run configuration: which graph to traverse and from where.
//!
//! Graph data is always supplied by the caller; nothing about the topology
//! is compiled into the engine.
//!
//! ```json
//! {
//!   "graph": {
//!     "nodes": ["A", "B", "C"],
//!     "edges": [["A", "B"], ["A", "C"]]
//!   },
//!   "start_node": "A",
//!   "policy": { "max_steps": 100 }
//! }
//! ```
//!
//! `graph.adjacency_matrix` (square 0/1 rows) may replace `graph.edges`.
//! Unknown fields are ignored.

use std::path::{Path, PathBuf};

use bfstep_kernel::store::{GraphStore, InvalidGraphError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::{PolicyError, RunPolicy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("graph config needs either `edges` or `adjacency_matrix`")]
    MissingTopology,

    #[error("graph config sets both `edges` and `adjacency_matrix`")]
    AmbiguousTopology,

    #[error(transparent)]
    InvalidGraph(#[from] InvalidGraphError),

    #[error("start node '{label}' is not in the graph")]
    UnknownStartNode { label: String },

    #[error(transparent)]
    InvalidPolicy(#[from] PolicyError),
}

/// Topology section of a run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Ordered labels; order is the neighbor tie-break order.
    pub nodes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<(String, String)>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjacency_matrix: Option<Vec<Vec<u8>>>,
}

impl GraphConfig {
    /// Build the graph store described by this section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingTopology`] / [`ConfigError::AmbiguousTopology`]
    /// unless exactly one of `edges` and `adjacency_matrix` is set, and
    /// [`ConfigError::InvalidGraph`] if the store rejects the data.
    pub fn build(&self) -> Result<GraphStore, ConfigError> {
        match (&self.edges, &self.adjacency_matrix) {
            (Some(edges), None) => Ok(GraphStore::new(self.nodes.as_slice(), edges.as_slice())?),
            (None, Some(matrix)) => Ok(GraphStore::from_adjacency_matrix(
                self.nodes.as_slice(),
                matrix.as_slice(),
            )?),
            (None, None) => Err(ConfigError::MissingTopology),
            (Some(_), Some(_)) => Err(ConfigError::AmbiguousTopology),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub graph: GraphConfig,
    pub start_node: String,
    #[serde(default)]
    pub policy: RunPolicy,
}

impl RunConfig {
    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the graph and check the start node and policy against it.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<GraphStore, ConfigError> {
        let graph = self.graph.build()?;
        if !graph.contains(&self.start_node) {
            return Err(ConfigError::UnknownStartNode {
                label: self.start_node.clone(),
            });
        }
        self.policy.validate()?;
        Ok(graph)
    }
}

/// Read and parse a configuration file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if it is not a valid configuration.
pub fn load_run_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    RunConfig::from_json_str(&text)
}
