//! Graph construction and lookup errors.

use thiserror::Error;

/// Malformed input graph, reported at construction time.
///
/// Construction is all-or-nothing: no partial store is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGraphError {
    /// A node label was the empty string.
    #[error("empty node label at position {position}")]
    EmptyLabel { position: usize },

    /// The same label was declared twice.
    #[error("duplicate node label '{label}'")]
    DuplicateLabel { label: String },

    /// An edge endpoint is not a declared node.
    #[error("edge ({from}, {to}) references unknown node '{missing}'")]
    UnknownEndpoint {
        from: String,
        to: String,
        missing: String,
    },

    /// An edge connects a node to itself.
    #[error("self-loop on node '{label}'")]
    SelfLoop { label: String },

    /// An undirected edge was listed more than once (in either direction).
    #[error("duplicate edge ({from}, {to})")]
    DuplicateEdge { from: String, to: String },

    /// The adjacency matrix row count does not match the node count.
    #[error("adjacency matrix has {rows} rows for {nodes} nodes")]
    MatrixRowCount { rows: usize, nodes: usize },

    /// An adjacency matrix row has the wrong length.
    #[error("adjacency matrix row {row} has {len} columns, expected {expected}")]
    MatrixRowLength {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// An adjacency matrix entry is neither 0 nor 1.
    #[error("adjacency matrix entry ({row}, {col}) must be 0 or 1, found {value}")]
    MatrixEntry { row: usize, col: usize, value: u8 },

    /// `matrix[row][col] != matrix[col][row]`.
    #[error("adjacency matrix is asymmetric at ({row}, {col})")]
    AsymmetricMatrix { row: usize, col: usize },
}

/// A lookup referenced a label that is not in the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node '{label}'")]
pub struct UnknownNodeError {
    pub label: String,
}

impl UnknownNodeError {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}
