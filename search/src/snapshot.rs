//! Read-only view of a traversal, consumed by the presentation layer after
//! every step.

use std::collections::BTreeSet;

use bfstep_kernel::proof::canon::{canonical_json_bytes_of, CanonError};
use bfstep_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use serde::{Deserialize, Serialize};

use crate::step::DiscoveredEdge;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Nodes in the order they were accepted as visited.
    pub visited: Vec<String>,
    /// Every recorded edge, in recording order.
    pub discovered_edges: Vec<DiscoveredEdge>,
    /// The most recently dequeued node; `None` before the first step.
    pub current_node: Option<String>,
    /// Queue contents, front first, redundant entries included.
    pub frontier: Vec<String>,
    pub is_complete: bool,
    pub steps_taken: u64,
}

impl Snapshot {
    /// The BFS spanning tree: for each node, only the edge that first
    /// discovered it.
    ///
    /// For a completed run over a connected graph this has exactly
    /// `visited.len() - 1` entries, even when `discovered_edges` holds more.
    #[must_use]
    pub fn tree_edges(&self) -> Vec<&DiscoveredEdge> {
        let mut reached: BTreeSet<&str> = self
            .visited
            .first()
            .map(String::as_str)
            .into_iter()
            .collect();
        self.discovered_edges
            .iter()
            .filter(|edge| reached.insert(edge.to.as_str()))
            .collect()
    }

    /// Whether `label` has been visited.
    #[must_use]
    pub fn is_visited(&self, label: &str) -> bool {
        self.visited.iter().any(|v| v == label)
    }

    /// Canonical JSON bytes of the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes_of(self)
    }

    /// Content hash of the canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            HashDomain::Snapshot,
            &self.to_canonical_json_bytes()?,
        ))
    }
}
