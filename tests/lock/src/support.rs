//! Helpers for driving the engine in tests without repeating setup.

use std::sync::Arc;

use bfstep_harness::fixtures::reference_graph;
use bfstep_kernel::store::GraphStore;
use bfstep_search::engine::TraversalEngine;
use bfstep_search::step::StepResult;
use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG`.
///
/// Logs go to stderr so that stdout stays byte-comparable across
/// processes. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

/// The reference graph behind an `Arc`, ready for an engine.
///
/// # Panics
///
/// Panics if the fixed reference data fails validation.
#[must_use]
pub fn shared_reference_graph() -> Arc<GraphStore> {
    Arc::new(reference_graph().expect("reference graph is valid"))
}

/// A fresh engine on the reference graph.
///
/// # Panics
///
/// Panics if `start` is not a reference node.
#[must_use]
pub fn reference_engine(start: &str) -> TraversalEngine {
    TraversalEngine::new(shared_reference_graph(), start).expect("start node exists")
}

/// Step until complete, returning every step result. Bounded by
/// `limit` so a broken engine fails the test instead of hanging it.
///
/// # Panics
///
/// Panics if a step errors or the engine is not complete after `limit` steps.
pub fn step_to_completion(engine: &mut TraversalEngine, limit: usize) -> Vec<StepResult> {
    let mut results = Vec::new();
    while !engine.is_complete() {
        assert!(results.len() < limit, "engine still running after {limit} steps");
        results.push(engine.step().expect("step succeeds while ready"));
    }
    results
}
