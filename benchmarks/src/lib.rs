//! Graph generators shared by the bfstep benchmark suites.

#![forbid(unsafe_code)]

use std::sync::Arc;

use bfstep_kernel::store::GraphStore;

fn labels(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("v{i}")).collect()
}

/// A path `v0 - v1 - ... - v{n-1}`.
///
/// # Panics
///
/// Panics if `n == 0`.
#[must_use]
pub fn path_graph(n: usize) -> Arc<GraphStore> {
    assert!(n > 0, "path graph needs at least one node");
    let labels = labels(n);
    let edges: Vec<(&str, &str)> = labels
        .windows(2)
        .map(|w| (w[0].as_str(), w[1].as_str()))
        .collect();
    Arc::new(GraphStore::new(&labels, &edges).expect("path graph is valid"))
}

/// A `side x side` grid with 4-neighborhood. Every interior node is
/// discovered twice, so this exercises redundant dequeues.
///
/// # Panics
///
/// Panics if `side == 0`.
#[must_use]
pub fn grid_graph(side: usize) -> Arc<GraphStore> {
    assert!(side > 0, "grid graph needs at least one node");
    let labels = labels(side * side);
    let mut edges = Vec::new();
    for row in 0..side {
        for col in 0..side {
            let here = row * side + col;
            if col + 1 < side {
                edges.push((labels[here].as_str(), labels[here + 1].as_str()));
            }
            if row + 1 < side {
                edges.push((labels[here].as_str(), labels[here + side].as_str()));
            }
        }
    }
    Arc::new(GraphStore::new(&labels, &edges).expect("grid graph is valid"))
}

/// Label of the first node in a generated graph.
pub const FIRST: &str = "v0";
