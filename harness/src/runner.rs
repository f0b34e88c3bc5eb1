//! Harness runner: drives a traversal engine one step at a time and records
//! what a presentation layer would see after every step.
//!
//! # Pipeline
//!
//! ```text
//! RunConfig::validate() → GraphStore → TraversalEngine::new()
//!   → [step() → snapshot()] × N → TranscriptV1 → export_state()
//! ```
//!
//! The runner owns the loop; the engine only ever performs single steps.

use std::sync::Arc;

use bfstep_kernel::proof::canon::CanonError;
use bfstep_kernel::proof::hash::ContentHash;
use bfstep_kernel::store::GraphStore;
use bfstep_search::engine::TraversalEngine;
use bfstep_search::error::TraversalError;
use bfstep_search::snapshot::Snapshot;
use bfstep_search::state::TraversalState;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ConfigError, RunConfig};
use crate::policy::{PolicyError, RunPolicy};
use crate::transcript::{FrameV1, TranscriptV1};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Traversal(#[from] TraversalError),
    #[error(transparent)]
    Canon(#[from] CanonError),
}

/// Why the runner stopped issuing steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TerminationReason {
    /// The engine reached `Complete`.
    Complete,
    /// `max_steps` steps were issued and the engine is still `Ready`.
    StepBudgetExceeded { max_steps: u64 },
}

/// Everything produced by one run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub graph: Arc<GraphStore>,
    pub graph_digest: ContentHash,
    pub policy: RunPolicy,
    pub transcript: TranscriptV1,
    pub transcript_digest: ContentHash,
    pub termination: TerminationReason,
    /// Engine state after the last step; resumable.
    pub final_state: TraversalState,
}

impl RunReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.termination == TerminationReason::Complete
    }

    #[must_use]
    pub fn final_snapshot(&self) -> Option<&Snapshot> {
        self.transcript.last_snapshot()
    }

    #[must_use]
    pub fn steps_taken(&self) -> u64 {
        self.final_state.steps_taken
    }
}

/// Issue `step()` calls until the engine completes or the policy budget is
/// spent, returning one frame per step.
///
/// The budget counts the engine's lifetime steps, so a resumed engine keeps
/// the steps it had already taken.
///
/// # Errors
///
/// Returns [`RunError::Policy`] for an invalid policy and
/// [`RunError::Traversal`] if the engine rejects a step.
pub fn drive(
    engine: &mut TraversalEngine,
    policy: &RunPolicy,
) -> Result<(Vec<FrameV1>, TerminationReason), RunError> {
    policy.validate()?;
    let mut frames = Vec::new();
    let termination = loop {
        if engine.is_complete() {
            break TerminationReason::Complete;
        }
        if engine.steps_taken() >= policy.max_steps {
            warn!(
                max_steps = policy.max_steps,
                queue_len = engine.frontier().len(),
                "step budget exhausted before the frontier drained"
            );
            break TerminationReason::StepBudgetExceeded {
                max_steps: policy.max_steps,
            };
        }
        let step = engine.step()?;
        frames.push(FrameV1 {
            step,
            snapshot: engine.snapshot(),
        });
    };
    Ok((frames, termination))
}

/// Run a full traversal of `graph` from `start_node`.
///
/// # Errors
///
/// Returns [`RunError`] for an invalid policy, an unknown start node, or a
/// serialization failure.
pub fn run(
    graph: Arc<GraphStore>,
    start_node: &str,
    policy: &RunPolicy,
) -> Result<RunReport, RunError> {
    let graph_digest = graph.digest()?;
    let mut engine = TraversalEngine::new(Arc::clone(&graph), start_node)?;
    info!(
        start = start_node,
        graph = %graph_digest,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "traversal run started"
    );

    let (frames, termination) = drive(&mut engine, policy)?;
    let mut transcript = TranscriptV1::new(&graph_digest, start_node);
    transcript.frames = frames;
    let transcript_digest = transcript.digest()?;
    let final_state = engine.export_state()?;

    info!(
        steps = final_state.steps_taken,
        visited = final_state.visited.len(),
        redundant = final_state.redundant_dequeues,
        ?termination,
        transcript = %transcript_digest,
        "traversal run finished"
    );

    Ok(RunReport {
        graph,
        graph_digest,
        policy: *policy,
        transcript,
        transcript_digest,
        termination,
        final_state,
    })
}

/// Validate a configuration and run it.
///
/// # Errors
///
/// Returns [`RunError::Config`] for configuration problems, otherwise as
/// [`run`].
pub fn run_config(config: &RunConfig) -> Result<RunReport, RunError> {
    let graph = Arc::new(config.validate()?);
    run(graph, &config.start_node, &config.policy)
}
