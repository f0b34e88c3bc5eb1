//! `GraphStore`: the fixed, read-only topology a traversal runs over.
//!
//! Nodes are identified by label. Declaration order is significant: the
//! neighbors of every node are listed in the order their labels were
//! declared, which is the tie-break order for traversal.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::json;
use tracing::debug;

use super::error::{InvalidGraphError, UnknownNodeError};
use crate::proof::canon::{canonical_json_bytes, CanonError};
use crate::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Immutable adjacency store for a small undirected graph.
///
/// Invariants (established by the constructors, never broken afterwards):
/// - labels are unique and non-empty
/// - adjacency is symmetric, without self-loops or parallel edges
/// - every neighbor list is sorted by declaration position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStore {
    labels: Vec<String>,
    index: BTreeMap<String, usize>,
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl GraphStore {
    /// Build a store from ordered node labels and an undirected edge list.
    ///
    /// Edge direction in the input is irrelevant: `(A, B)` and `(B, A)` name
    /// the same edge.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGraphError`] for empty or duplicate labels, edges that
    /// reference undeclared nodes, self-loops, and duplicate edges.
    pub fn new<L, E>(labels: &[L], edges: &[(E, E)]) -> Result<Self, InvalidGraphError>
    where
        L: AsRef<str>,
        E: AsRef<str>,
    {
        let (labels, index) = index_labels(labels)?;
        let mut adjacency = vec![Vec::new(); labels.len()];
        let mut seen: BTreeSet<(usize, usize)> = BTreeSet::new();

        for (a, b) in edges {
            let (a, b) = (a.as_ref(), b.as_ref());
            let ia = endpoint(&index, a, b, a)?;
            let ib = endpoint(&index, a, b, b)?;
            if ia == ib {
                return Err(InvalidGraphError::SelfLoop { label: a.into() });
            }
            if !seen.insert((ia.min(ib), ia.max(ib))) {
                return Err(InvalidGraphError::DuplicateEdge {
                    from: a.into(),
                    to: b.into(),
                });
            }
            adjacency[ia].push(ib);
            adjacency[ib].push(ia);
        }

        Ok(Self::from_parts(labels, index, adjacency, seen.len()))
    }

    pub(crate) fn from_parts(
        labels: Vec<String>,
        index: BTreeMap<String, usize>,
        mut adjacency: Vec<Vec<usize>>,
        edge_count: usize,
    ) -> Self {
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
        }
        debug!(nodes = labels.len(), edges = edge_count, "graph store built");
        Self {
            labels,
            index,
            adjacency,
            edge_count,
        }
    }

    /// Whether `label` is a node of this graph.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Neighbors of `label` in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownNodeError`] if `label` is not in the store.
    pub fn neighbors(&self, label: &str) -> Result<Vec<&str>, UnknownNodeError> {
        let idx = self
            .index_of(label)
            .ok_or_else(|| UnknownNodeError::new(label))?;
        Ok(self.adjacency[idx]
            .iter()
            .map(|&n| self.labels[n].as_str())
            .collect())
    }

    /// Number of neighbors of `label`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownNodeError`] if `label` is not in the store.
    pub fn degree(&self, label: &str) -> Result<usize, UnknownNodeError> {
        self.index_of(label)
            .map(|idx| self.adjacency[idx].len())
            .ok_or_else(|| UnknownNodeError::new(label))
    }

    /// Declaration position of `label`.
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Label at declaration position `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.node_count()`.
    #[must_use]
    pub fn label(&self, idx: usize) -> &str {
        &self.labels[idx]
    }

    /// Neighbor positions of the node at `idx`, ascending.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.node_count()`.
    #[must_use]
    pub fn neighbor_indices(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }

    /// Whether `a` and `b` (positions) are joined by an edge.
    #[must_use]
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|neighbors| neighbors.binary_search(&b).is_ok())
    }

    /// All labels in declaration order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Every undirected edge once, as `(lower, higher)` declaration position,
    /// sorted.
    #[must_use]
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(i, neighbors)| {
                neighbors
                    .iter()
                    .filter(move |&&j| j > i)
                    .map(move |&j| (self.labels[i].as_str(), self.labels[j].as_str()))
            })
            .collect()
    }

    /// JSON form: `{"edges": [[a, b], ...], "nodes": [...]}`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let edges: Vec<[&str; 2]> = self.edges().into_iter().map(|(a, b)| [a, b]).collect();
        json!({
            "edges": edges,
            "nodes": self.labels,
        })
    }

    /// Content hash of the canonical JSON form.
    ///
    /// Stores built from the same labels and edge set (in any edge order or
    /// direction, or from the equivalent adjacency matrix) share a digest.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonical serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::GraphStore, &bytes))
    }
}

/// Validate labels and build the label → position index.
pub(crate) fn index_labels<L: AsRef<str>>(
    labels: &[L],
) -> Result<(Vec<String>, BTreeMap<String, usize>), InvalidGraphError> {
    let mut owned = Vec::with_capacity(labels.len());
    let mut index = BTreeMap::new();
    for (position, label) in labels.iter().enumerate() {
        let label = label.as_ref();
        if label.is_empty() {
            return Err(InvalidGraphError::EmptyLabel { position });
        }
        if index.insert(label.to_string(), position).is_some() {
            return Err(InvalidGraphError::DuplicateLabel {
                label: label.into(),
            });
        }
        owned.push(label.to_string());
    }
    Ok((owned, index))
}

fn endpoint(
    index: &BTreeMap<String, usize>,
    from: &str,
    to: &str,
    label: &str,
) -> Result<usize, InvalidGraphError> {
    index
        .get(label)
        .copied()
        .ok_or_else(|| InvalidGraphError::UnknownEndpoint {
            from: from.into(),
            to: to.into(),
            missing: label.into(),
        })
}
