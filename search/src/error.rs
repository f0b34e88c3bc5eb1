//! Typed traversal errors.
//!
//! Every error is deterministic given its inputs and leaves the engine that
//! returned it unchanged.

use bfstep_kernel::proof::canon::CanonError;
use bfstep_kernel::store::UnknownNodeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    /// The start node is not in the graph.
    #[error(transparent)]
    UnknownNode(#[from] UnknownNodeError),

    /// `step()` was called after the frontier drained.
    ///
    /// Recoverable: check `is_complete()` before stepping.
    #[error("traversal already complete after {steps_taken} steps")]
    AlreadyComplete { steps_taken: u64 },

    /// An exported state was resumed against a different graph.
    #[error("traversal state belongs to graph {expected}, not {actual}")]
    GraphMismatch { expected: String, actual: String },

    /// An exported state violates the traversal invariants.
    #[error("inconsistent traversal state: {detail}")]
    InconsistentState { detail: String },

    /// An exported state carries an unknown `schema_version`.
    #[error("unsupported traversal state schema '{found}'")]
    UnsupportedSchema { found: String },

    /// Exported state bytes are not valid JSON for `TraversalState`.
    #[error("traversal state decode failed: {detail}")]
    StateDecode { detail: String },

    #[error(transparent)]
    Canon(#[from] CanonError),
}

impl TraversalError {
    pub(crate) fn inconsistent(detail: impl Into<String>) -> Self {
        Self::InconsistentState {
            detail: detail.into(),
        }
    }
}
