//! Per-step result types.

use serde::{Deserialize, Serialize};

/// An edge recorded when `to` was enqueued from `from`.
///
/// Recorded only when `to` was not yet visited at that moment; a node can
/// therefore be the target of more than one discovered edge if several
/// visited neighbors reach it before its own visit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiscoveredEdge {
    pub from: String,
    pub to: String,
}

impl DiscoveredEdge {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl From<(&str, &str)> for DiscoveredEdge {
    fn from((from, to): (&str, &str)) -> Self {
        Self::new(from, to)
    }
}

/// Engine lifecycle.
///
/// `Ready` loops on itself until the frontier drains; `Complete` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Ready,
    Complete,
}

/// What a single `step()` did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// 1-based position of this step in the run.
    pub step_index: u64,
    /// The node dequeued by this step.
    pub current_node: String,
    /// False when the dequeue hit an already-visited node (redundant entry).
    pub newly_visited: bool,
    /// Edges recorded by this step, in neighbor order.
    pub newly_discovered_edges: Vec<DiscoveredEdge>,
    pub is_complete: bool,
    /// Frontier size after the step.
    pub queue_len: usize,
}
