//! bfstep search: a resumable breadth-first traversal engine.
//!
//! # Crate dependency graph
//!
//! ```text
//! bfstep_kernel  ←  bfstep_search  ←  bfstep_harness
//! (graph store)     (engine, state)    (config, runner, reports)
//! ```
//!
//! # Key types
//!
//! - [`TraversalEngine`](engine::TraversalEngine): one BFS run, advanced one
//!   dequeue per `step()`
//! - [`StepResult`](step::StepResult): what a single step did
//! - [`Snapshot`](snapshot::Snapshot): read-only view for rendering
//! - [`TraversalState`](state::TraversalState): exportable state for
//!   pause/resume across process boundaries

#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod frontier;
pub mod snapshot;
pub mod state;
pub mod step;
