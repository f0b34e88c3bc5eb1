//! `TraversalEngine`: a breadth-first traversal advanced one dequeue per
//! `step()` call.
//!
//! The engine never loops on its own. Each `step()` does a bounded amount of
//! work (the degree of the dequeued node) and returns, so a driver can pause
//! between steps for as long as it likes, or export the state and resume it
//! later in another engine.

use std::collections::BTreeSet;
use std::sync::Arc;

use bfstep_kernel::store::{GraphStore, UnknownNodeError};
use tracing::debug;

use crate::error::TraversalError;
use crate::frontier::FifoFrontier;
use crate::snapshot::Snapshot;
use crate::state::{TraversalState, TRAVERSAL_STATE_SCHEMA};
use crate::step::{DiscoveredEdge, Phase, StepResult};

/// One breadth-first run over a shared, immutable graph.
///
/// State machine: `Ready` → `Ready` … → `Complete`. A new run (new start or
/// new graph) needs a fresh engine; there is no in-place restart.
#[derive(Debug, Clone)]
pub struct TraversalEngine {
    graph: Arc<GraphStore>,
    start: usize,
    frontier: FifoFrontier,
    visited: Vec<usize>,
    visited_mask: Vec<bool>,
    discovered: Vec<(usize, usize)>,
    current: Option<usize>,
    phase: Phase,
    steps_taken: u64,
    redundant_dequeues: u64,
}

impl TraversalEngine {
    /// Create an engine seeded with `start` in the frontier.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::UnknownNode`] if `start` is not in `graph`.
    pub fn new(graph: Arc<GraphStore>, start: &str) -> Result<Self, TraversalError> {
        let start_idx = graph
            .index_of(start)
            .ok_or_else(|| UnknownNodeError::new(start))?;
        let mut frontier = FifoFrontier::new();
        frontier.push(start_idx);
        let node_count = graph.node_count();
        debug!(start, nodes = node_count, "traversal engine created");
        Ok(Self {
            graph,
            start: start_idx,
            frontier,
            visited: Vec::new(),
            visited_mask: vec![false; node_count],
            discovered: Vec::new(),
            current: None,
            phase: Phase::Ready,
            steps_taken: 0,
            redundant_dequeues: 0,
        })
    }

    /// Dequeue one node and, if it is not yet visited, visit and expand it.
    ///
    /// Expansion walks the neighbors in graph order. Every neighbor that is
    /// not yet visited gets an edge recorded and is enqueued, even if it is
    /// already waiting in the frontier. A dequeue of an already-visited node
    /// changes nothing but the frontier and `current_node`.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::AlreadyComplete`] once the run is complete;
    /// the engine is left untouched.
    pub fn step(&mut self) -> Result<StepResult, TraversalError> {
        if self.phase == Phase::Complete {
            return Err(TraversalError::AlreadyComplete {
                steps_taken: self.steps_taken,
            });
        }
        let Some(node) = self.frontier.pop() else {
            return Err(TraversalError::inconsistent(
                "engine is ready but its frontier is empty",
            ));
        };

        self.steps_taken += 1;
        self.current = Some(node);

        let newly_visited = !self.visited_mask[node];
        let mut newly_discovered_edges = Vec::new();
        if newly_visited {
            self.visited_mask[node] = true;
            self.visited.push(node);
            let graph = Arc::clone(&self.graph);
            for &neighbor in graph.neighbor_indices(node) {
                if self.visited_mask[neighbor] {
                    continue;
                }
                self.discovered.push((node, neighbor));
                self.frontier.push(neighbor);
                newly_discovered_edges.push(DiscoveredEdge::new(
                    graph.label(node),
                    graph.label(neighbor),
                ));
            }
        } else {
            self.redundant_dequeues += 1;
        }

        if self.frontier.is_empty() {
            self.phase = Phase::Complete;
        }

        let current_node = self.graph.label(node).to_string();
        debug!(
            step = self.steps_taken,
            node = %current_node,
            newly_visited,
            discovered = newly_discovered_edges.len(),
            queue_len = self.frontier.len(),
            complete = self.is_complete(),
            "traversal step"
        );

        Ok(StepResult {
            step_index: self.steps_taken,
            current_node,
            newly_visited,
            newly_discovered_edges,
            is_complete: self.is_complete(),
            queue_len: self.frontier.len(),
        })
    }

    /// Point-in-time copy of the exposed state. Side-effect free.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            visited: self.visited().into_iter().map(String::from).collect(),
            discovered_edges: self.discovered_edges(),
            current_node: self.current_node().map(String::from),
            frontier: self.frontier().into_iter().map(String::from).collect(),
            is_complete: self.is_complete(),
            steps_taken: self.steps_taken,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn graph(&self) -> &Arc<GraphStore> {
        &self.graph
    }

    #[must_use]
    pub fn start_node(&self) -> &str {
        self.graph.label(self.start)
    }

    /// The most recently dequeued node; `None` before the first step.
    #[must_use]
    pub fn current_node(&self) -> Option<&str> {
        self.current.map(|idx| self.graph.label(idx))
    }

    /// Visited labels in visitation order.
    #[must_use]
    pub fn visited(&self) -> Vec<&str> {
        self.visited.iter().map(|&idx| self.graph.label(idx)).collect()
    }

    /// Recorded edges in recording order.
    #[must_use]
    pub fn discovered_edges(&self) -> Vec<DiscoveredEdge> {
        self.discovered
            .iter()
            .map(|&(from, to)| DiscoveredEdge::new(self.graph.label(from), self.graph.label(to)))
            .collect()
    }

    /// Frontier labels, front first.
    #[must_use]
    pub fn frontier(&self) -> Vec<&str> {
        self.frontier.iter().map(|idx| self.graph.label(idx)).collect()
    }

    #[must_use]
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Dequeues that hit an already-visited node.
    #[must_use]
    pub fn redundant_dequeues(&self) -> u64 {
        self.redundant_dequeues
    }

    #[must_use]
    pub fn frontier_high_water(&self) -> u64 {
        self.frontier.high_water()
    }

    /// Export everything needed to continue this run elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::Canon`] if the graph digest cannot be
    /// computed.
    pub fn export_state(&self) -> Result<TraversalState, TraversalError> {
        let snapshot = self.snapshot();
        Ok(TraversalState {
            schema_version: TRAVERSAL_STATE_SCHEMA.to_string(),
            graph_digest: self.graph.digest()?.as_str().to_string(),
            start_node: self.start_node().to_string(),
            frontier: snapshot.frontier,
            visited: snapshot.visited,
            discovered_edges: snapshot.discovered_edges,
            current_node: snapshot.current_node,
            is_complete: snapshot.is_complete,
            steps_taken: self.steps_taken,
            redundant_dequeues: self.redundant_dequeues,
            frontier_high_water: self.frontier.high_water(),
            total_enqueued: self.frontier.total_enqueued(),
        })
    }

    /// Rebuild an engine from an exported state.
    ///
    /// # Errors
    ///
    /// - [`TraversalError::UnsupportedSchema`] for an unknown schema tag
    /// - [`TraversalError::GraphMismatch`] if `graph` is not the graph the
    ///   state was exported from
    /// - [`TraversalError::InconsistentState`] if the state breaks a
    ///   traversal invariant
    pub fn resume(graph: Arc<GraphStore>, state: &TraversalState) -> Result<Self, TraversalError> {
        if state.schema_version != TRAVERSAL_STATE_SCHEMA {
            return Err(TraversalError::UnsupportedSchema {
                found: state.schema_version.clone(),
            });
        }
        let actual = graph.digest()?;
        if actual.as_str() != state.graph_digest {
            return Err(TraversalError::GraphMismatch {
                expected: state.graph_digest.clone(),
                actual: actual.as_str().to_string(),
            });
        }

        let resolve = |label: &str, role: &str| {
            graph.index_of(label).ok_or_else(|| {
                TraversalError::inconsistent(format!("{role} '{label}' is not in the graph"))
            })
        };

        let start = resolve(&state.start_node, "start node")?;
        let frontier = state
            .frontier
            .iter()
            .map(|label| resolve(label, "frontier node"))
            .collect::<Result<Vec<_>, _>>()?;

        let mut visited_mask = vec![false; graph.node_count()];
        let mut visited = Vec::with_capacity(state.visited.len());
        for label in &state.visited {
            let idx = resolve(label, "visited node")?;
            if visited_mask[idx] {
                return Err(TraversalError::inconsistent(format!(
                    "node '{label}' is visited twice"
                )));
            }
            visited_mask[idx] = true;
            visited.push(idx);
        }
        let mut discovered = Vec::with_capacity(state.discovered_edges.len());
        for edge in &state.discovered_edges {
            let from = resolve(&edge.from, "edge source")?;
            let to = resolve(&edge.to, "edge target")?;
            if !graph.has_edge(from, to) {
                return Err(TraversalError::inconsistent(format!(
                    "({}, {}) is not an edge of the graph",
                    edge.from, edge.to
                )));
            }
            if !visited_mask[from] {
                return Err(TraversalError::inconsistent(format!(
                    "edge source '{}' was never visited",
                    edge.from
                )));
            }
            discovered.push((from, to));
        }

        match visited.first() {
            None => {
                if state.steps_taken != 0 || !discovered.is_empty() || frontier != [start] {
                    return Err(TraversalError::inconsistent(
                        "an unstarted run must hold exactly the start node in its frontier",
                    ));
                }
            }
            Some(&first) if first != start => {
                return Err(TraversalError::inconsistent(
                    "first visited node is not the start node",
                ));
            }
            Some(_) => {
                let targets: BTreeSet<usize> = discovered.iter().map(|&(_, to)| to).collect();
                if let Some(&stray) = frontier.iter().find(|&idx| !targets.contains(idx)) {
                    return Err(TraversalError::inconsistent(format!(
                        "frontier node '{}' was never discovered",
                        graph.label(stray)
                    )));
                }
            }
        }

        let visits = visited.len() as u64;
        if state.steps_taken != visits + state.redundant_dequeues {
            return Err(TraversalError::inconsistent(format!(
                "steps_taken {} is not {visits} visits plus {} redundant dequeues",
                state.steps_taken, state.redundant_dequeues
            )));
        }
        if state.total_enqueued != discovered.len() as u64 + 1 {
            return Err(TraversalError::inconsistent(format!(
                "total_enqueued {} does not match {} recorded edges",
                state.total_enqueued,
                discovered.len()
            )));
        }

        let current = state
            .current_node
            .as_deref()
            .map(|label| resolve(label, "current node"))
            .transpose()?;
        if current.is_none() != (state.steps_taken == 0) {
            return Err(TraversalError::inconsistent(
                "current node must be set exactly when steps have been taken",
            ));
        }
        if state.is_complete != frontier.is_empty() {
            return Err(TraversalError::inconsistent(
                "completion flag disagrees with the frontier",
            ));
        }

        debug!(
            start = %state.start_node,
            steps = state.steps_taken,
            visited = visited.len(),
            "traversal engine resumed"
        );

        Ok(Self {
            graph,
            start,
            frontier: FifoFrontier::from_parts(
                frontier,
                state.frontier_high_water,
                state.total_enqueued,
            ),
            visited,
            visited_mask,
            discovered,
            current,
            phase: if state.is_complete {
                Phase::Complete
            } else {
                Phase::Ready
            },
            steps_taken: state.steps_taken,
            redundant_dequeues: state.redundant_dequeues,
        })
    }
}
