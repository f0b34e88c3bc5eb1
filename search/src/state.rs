//! Exportable traversal state.
//!
//! A `TraversalState` is everything an engine needs to continue a run after
//! an arbitrarily long pause: the caller stores it, and
//! [`crate::engine::TraversalEngine::resume`] rebuilds an engine that steps
//! exactly as the original would have.

use bfstep_kernel::proof::canon::canonical_json_bytes_of;
use bfstep_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use serde::{Deserialize, Serialize};

use crate::error::TraversalError;
use crate::step::DiscoveredEdge;

/// Schema tag written into every exported state.
pub const TRAVERSAL_STATE_SCHEMA: &str = "bfstep.traversal_state.v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalState {
    pub schema_version: String,
    /// Digest of the graph the state was exported from.
    pub graph_digest: String,
    pub start_node: String,
    pub frontier: Vec<String>,
    pub visited: Vec<String>,
    pub discovered_edges: Vec<DiscoveredEdge>,
    pub current_node: Option<String>,
    pub is_complete: bool,
    pub steps_taken: u64,
    pub redundant_dequeues: u64,
    pub frontier_high_water: u64,
    pub total_enqueued: u64,
}

impl TraversalState {
    /// Canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::Canon`] if serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, TraversalError> {
        Ok(canonical_json_bytes_of(self)?)
    }

    /// Decode state bytes. Structural consistency is checked on resume, not
    /// here.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::StateDecode`] for malformed JSON and
    /// [`TraversalError::UnsupportedSchema`] for an unknown schema tag.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, TraversalError> {
        let state: Self = serde_json::from_slice(bytes).map_err(|e| TraversalError::StateDecode {
            detail: e.to_string(),
        })?;
        if state.schema_version != TRAVERSAL_STATE_SCHEMA {
            return Err(TraversalError::UnsupportedSchema {
                found: state.schema_version,
            });
        }
        Ok(state)
    }

    /// Content hash of the canonical bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::Canon`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, TraversalError> {
        Ok(canonical_hash(
            HashDomain::TraversalState,
            &self.to_json_bytes()?,
        ))
    }
}
