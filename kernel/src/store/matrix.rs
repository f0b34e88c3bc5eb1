//! Adjacency-matrix construction, the storage format of the classic
//! classroom BFS visualizer.

use super::error::InvalidGraphError;
use super::graph_store::{index_labels, GraphStore};

impl GraphStore {
    /// Build a store from labels and a square 0/1 adjacency matrix.
    ///
    /// `matrix[i][j] == 1` means an edge between `labels[i]` and `labels[j]`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGraphError`] for label problems, a non-square matrix,
    /// entries other than 0/1, a non-zero diagonal, or an asymmetric matrix.
    pub fn from_adjacency_matrix<L: AsRef<str>>(
        labels: &[L],
        matrix: &[Vec<u8>],
    ) -> Result<Self, InvalidGraphError> {
        let (labels, index) = index_labels(labels)?;
        let n = labels.len();
        if matrix.len() != n {
            return Err(InvalidGraphError::MatrixRowCount {
                rows: matrix.len(),
                nodes: n,
            });
        }
        for (row, entries) in matrix.iter().enumerate() {
            if entries.len() != n {
                return Err(InvalidGraphError::MatrixRowLength {
                    row,
                    len: entries.len(),
                    expected: n,
                });
            }
        }

        let mut adjacency = vec![Vec::new(); n];
        let mut edge_count = 0;
        for (row, entries) in matrix.iter().enumerate() {
            for (col, &value) in entries.iter().enumerate() {
                match value {
                    0 => {}
                    1 if row == col => {
                        return Err(InvalidGraphError::SelfLoop {
                            label: labels[row].clone(),
                        });
                    }
                    1 => {
                        if matrix[col][row] != 1 {
                            return Err(InvalidGraphError::AsymmetricMatrix { row, col });
                        }
                        adjacency[row].push(col);
                        if col > row {
                            edge_count += 1;
                        }
                    }
                    _ => return Err(InvalidGraphError::MatrixEntry { row, col, value }),
                }
            }
        }

        Ok(Self::from_parts(labels, index, adjacency, edge_count))
    }

    /// Render the store back into a 0/1 adjacency matrix.
    #[must_use]
    pub fn to_adjacency_matrix(&self) -> Vec<Vec<u8>> {
        let n = self.node_count();
        (0..n)
            .map(|row| {
                let mut entries = vec![0u8; n];
                for &col in self.neighbor_indices(row) {
                    entries[col] = 1;
                }
                entries
            })
            .collect()
    }
}
