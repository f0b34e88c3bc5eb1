//! Run transcript: one frame per `step()`, holding the step result and the
//! snapshot a presentation layer would have rendered right after it.

use bfstep_kernel::proof::canon::{canonical_json_bytes_of, CanonError};
use bfstep_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use bfstep_search::snapshot::Snapshot;
use bfstep_search::step::StepResult;
use serde::{Deserialize, Serialize};

pub const TRANSCRIPT_SCHEMA: &str = "bfstep.transcript.v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameV1 {
    pub step: StepResult,
    pub snapshot: Snapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptV1 {
    pub schema_version: String,
    pub graph_digest: String,
    pub start_node: String,
    pub frames: Vec<FrameV1>,
}

impl TranscriptV1 {
    #[must_use]
    pub fn new(graph_digest: &ContentHash, start_node: &str) -> Self {
        Self {
            schema_version: TRANSCRIPT_SCHEMA.to_string(),
            graph_digest: graph_digest.as_str().to_string(),
            start_node: start_node.to_string(),
            frames: Vec::new(),
        }
    }

    /// The snapshot after the last recorded step.
    #[must_use]
    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.frames.last().map(|frame| &frame.snapshot)
    }

    /// Visited labels after the last recorded step.
    #[must_use]
    pub fn visit_order(&self) -> Vec<&str> {
        self.last_snapshot()
            .map(|snap| snap.visited.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Check that frames are numbered 1..=n, that each snapshot agrees with
    /// its step, and that only the last frame can be complete.
    ///
    /// Returns a description of the first problem found.
    #[must_use]
    pub fn first_inconsistency(&self) -> Option<String> {
        let last = self.frames.len();
        for (i, frame) in self.frames.iter().enumerate() {
            let expected = i as u64 + 1;
            if frame.step.step_index != expected || frame.snapshot.steps_taken != expected {
                return Some(format!("frame {i} is not step {expected}"));
            }
            if frame.snapshot.current_node.as_deref() != Some(frame.step.current_node.as_str()) {
                return Some(format!("frame {i} snapshot disagrees on current node"));
            }
            if frame.step.is_complete != frame.snapshot.is_complete {
                return Some(format!("frame {i} snapshot disagrees on completion"));
            }
            if frame.step.is_complete && i + 1 != last {
                return Some(format!("frame {i} is complete but not last"));
            }
        }
        None
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes_of(self)
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            HashDomain::Transcript,
            &self.to_canonical_json_bytes()?,
        ))
    }
}
