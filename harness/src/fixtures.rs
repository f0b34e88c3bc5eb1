//! Reference graph used by the classroom visualizer, in both of its
//! storage forms.
//!
//! ```text
//!     A
//!    / \
//!   B   C
//!  / \   \
//! D   E---F
//! ```

use bfstep_kernel::store::{GraphStore, InvalidGraphError};

use crate::config::{GraphConfig, RunConfig};
use crate::policy::RunPolicy;

pub const REFERENCE_NODES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

pub const REFERENCE_EDGES: [(&str, &str); 6] = [
    ("A", "B"),
    ("A", "C"),
    ("B", "D"),
    ("B", "E"),
    ("C", "F"),
    ("E", "F"),
];

#[must_use]
pub fn reference_matrix() -> Vec<Vec<u8>> {
    vec![
        vec![0, 1, 1, 0, 0, 0],
        vec![1, 0, 0, 1, 1, 0],
        vec![1, 0, 0, 0, 0, 1],
        vec![0, 1, 0, 0, 0, 0],
        vec![0, 1, 0, 0, 0, 1],
        vec![0, 0, 1, 0, 1, 0],
    ]
}

/// # Errors
///
/// Never fails for the fixed reference data; the `Result` mirrors
/// [`GraphStore::new`].
pub fn reference_graph() -> Result<GraphStore, InvalidGraphError> {
    GraphStore::new(&REFERENCE_NODES, &REFERENCE_EDGES)
}

fn reference_labels() -> Vec<String> {
    REFERENCE_NODES.iter().map(ToString::to_string).collect()
}

/// Reference graph as an edge-list config, starting at `start_node`.
#[must_use]
pub fn reference_config(start_node: &str) -> RunConfig {
    RunConfig {
        graph: GraphConfig {
            nodes: reference_labels(),
            edges: Some(
                REFERENCE_EDGES
                    .iter()
                    .map(|&(a, b)| (a.to_string(), b.to_string()))
                    .collect(),
            ),
            adjacency_matrix: None,
        },
        start_node: start_node.to_string(),
        policy: RunPolicy::default(),
    }
}

/// Reference graph as an adjacency-matrix config, starting at `start_node`.
#[must_use]
pub fn reference_matrix_config(start_node: &str) -> RunConfig {
    RunConfig {
        graph: GraphConfig {
            nodes: reference_labels(),
            edges: None,
            adjacency_matrix: Some(reference_matrix()),
        },
        start_node: start_node.to_string(),
        policy: RunPolicy::default(),
    }
}
