//! Report directory persistence: write a run report to disk, read it back,
//! and pick the traversal up again from the stored state.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   graph.json          canonical JSON, `{"edges": [...], "nodes": [...]}`
//!   transcript.json     canonical JSON, one frame per step
//!   final_state.json    canonical JSON, resumable `TraversalState`
//!   report_digest.txt   ASCII digest over the three artifacts
//! ```
//!
//! The directory path is never hashed. Reading is fail-closed: a missing
//! artifact, a digest mismatch, artifacts bound to different graphs, and a
//! final state that disagrees with the last frame are all errors.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bfstep_kernel::proof::canon::{canonical_json_bytes, CanonError};
use bfstep_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use bfstep_kernel::store::{GraphStore, InvalidGraphError};
use bfstep_search::engine::TraversalEngine;
use bfstep_search::error::TraversalError;
use bfstep_search::state::TraversalState;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::runner::RunReport;
use crate::transcript::TranscriptV1;

const GRAPH_FILENAME: &str = "graph.json";
const TRANSCRIPT_FILENAME: &str = "transcript.json";
const FINAL_STATE_FILENAME: &str = "final_state.json";
const DIGEST_FILENAME: &str = "report_digest.txt";

/// Hashed artifacts, in digest-basis order.
const ARTIFACT_FILENAMES: [&str; 3] = [
    FINAL_STATE_FILENAME,
    GRAPH_FILENAME,
    TRANSCRIPT_FILENAME,
];

#[derive(Debug, Error)]
pub enum ReportDirWriteError {
    #[error("I/O error writing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Canon(#[from] CanonError),
    #[error(transparent)]
    Traversal(#[from] TraversalError),
}

#[derive(Debug, Error)]
pub enum ReportDirReadError {
    #[error("report artifact '{name}' is missing")]
    MissingArtifact { name: String },
    #[error("failed to decode '{name}': {detail}")]
    Decode { name: String, detail: String },
    #[error("report digest mismatch: stored {stored}, recomputed {recomputed}")]
    DigestMismatch { stored: String, recomputed: String },
    #[error("'{name}' is bound to graph {found}, expected {expected}")]
    GraphMismatch {
        name: String,
        found: String,
        expected: String,
    },
    #[error("transcript is inconsistent: {detail}")]
    InconsistentTranscript { detail: String },
    #[error("final state disagrees with the transcript: {detail}")]
    StateTranscriptMismatch { detail: String },
    #[error(transparent)]
    InvalidGraph(#[from] InvalidGraphError),
    #[error(transparent)]
    Canon(#[from] CanonError),
}

/// A report read back from disk.
#[derive(Debug, Clone)]
pub struct StoredReport {
    pub graph: Arc<GraphStore>,
    pub transcript: TranscriptV1,
    pub final_state: TraversalState,
    pub digest: ContentHash,
}

impl StoredReport {
    /// Rebuild the engine exactly where the stored run stopped.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError`] if the stored state cannot be resumed.
    pub fn resume_engine(&self) -> Result<TraversalEngine, TraversalError> {
        TraversalEngine::resume(Arc::clone(&self.graph), &self.final_state)
    }
}

#[derive(Deserialize)]
struct GraphArtifact {
    nodes: Vec<String>,
    edges: Vec<(String, String)>,
}

/// Write `report` into `dir`, creating it if needed. Returns the report
/// digest that was written to `report_digest.txt`.
///
/// # Errors
///
/// Returns [`ReportDirWriteError`] on I/O or serialization failure.
pub fn write_report_dir(
    report: &RunReport,
    dir: &Path,
) -> Result<ContentHash, ReportDirWriteError> {
    std::fs::create_dir_all(dir).map_err(|source| ReportDirWriteError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let graph_bytes = canonical_json_bytes(&report.graph.to_json_value())?;
    let transcript_bytes = report.transcript.to_canonical_json_bytes()?;
    let state_bytes = report.final_state.to_json_bytes()?;
    let digest = report_digest(&[
        state_bytes.as_slice(),
        graph_bytes.as_slice(),
        transcript_bytes.as_slice(),
    ])?;

    write_atomic(&dir.join(GRAPH_FILENAME), &graph_bytes)?;
    write_atomic(&dir.join(TRANSCRIPT_FILENAME), &transcript_bytes)?;
    write_atomic(&dir.join(FINAL_STATE_FILENAME), &state_bytes)?;
    write_atomic(&dir.join(DIGEST_FILENAME), digest.as_str().as_bytes())?;

    debug!(dir = %dir.display(), digest = %digest, "report directory written");
    Ok(digest)
}

/// Read and verify a report directory.
///
/// # Errors
///
/// Returns [`ReportDirReadError`] on any missing file, decode failure,
/// digest mismatch, graph binding mismatch, or a final state that is not
/// the state behind the last transcript frame.
pub fn read_report_dir(dir: &Path) -> Result<StoredReport, ReportDirReadError> {
    let state_bytes = read_artifact(dir, FINAL_STATE_FILENAME)?;
    let graph_bytes = read_artifact(dir, GRAPH_FILENAME)?;
    let transcript_bytes = read_artifact(dir, TRANSCRIPT_FILENAME)?;
    let stored = read_artifact(dir, DIGEST_FILENAME)?;
    let stored = String::from_utf8_lossy(&stored).trim().to_string();

    let recomputed = report_digest(&[
        state_bytes.as_slice(),
        graph_bytes.as_slice(),
        transcript_bytes.as_slice(),
    ])?;
    if recomputed.as_str() != stored {
        return Err(ReportDirReadError::DigestMismatch {
            stored,
            recomputed: recomputed.as_str().to_string(),
        });
    }

    let graph: GraphArtifact = decode(GRAPH_FILENAME, &graph_bytes)?;
    let graph = Arc::new(GraphStore::new(
        graph.nodes.as_slice(),
        graph.edges.as_slice(),
    )?);
    let graph_digest = graph.digest()?;

    let transcript: TranscriptV1 = decode(TRANSCRIPT_FILENAME, &transcript_bytes)?;
    check_binding(TRANSCRIPT_FILENAME, &transcript.graph_digest, &graph_digest)?;
    if let Some(detail) = transcript.first_inconsistency() {
        return Err(ReportDirReadError::InconsistentTranscript { detail });
    }

    let final_state =
        TraversalState::from_json_bytes(&state_bytes).map_err(|e| ReportDirReadError::Decode {
            name: FINAL_STATE_FILENAME.to_string(),
            detail: e.to_string(),
        })?;
    check_binding(FINAL_STATE_FILENAME, &final_state.graph_digest, &graph_digest)?;
    check_state_matches_transcript(&final_state, &transcript)?;

    Ok(StoredReport {
        graph,
        transcript,
        final_state,
        digest: recomputed,
    })
}

/// The final state must be the state the last frame was rendered from.
fn check_state_matches_transcript(
    state: &TraversalState,
    transcript: &TranscriptV1,
) -> Result<(), ReportDirReadError> {
    let mismatch = |field: &str| {
        Err(ReportDirReadError::StateTranscriptMismatch {
            detail: format!("{field} differs from the last frame"),
        })
    };
    if state.start_node != transcript.start_node {
        return mismatch("start_node");
    }
    let Some(last) = transcript.last_snapshot() else {
        return if state.steps_taken == 0 {
            Ok(())
        } else {
            mismatch("steps_taken")
        };
    };
    if state.steps_taken != last.steps_taken {
        return mismatch("steps_taken");
    }
    if state.visited != last.visited {
        return mismatch("visited");
    }
    if state.discovered_edges != last.discovered_edges {
        return mismatch("discovered_edges");
    }
    if state.frontier != last.frontier {
        return mismatch("frontier");
    }
    if state.current_node != last.current_node || state.is_complete != last.is_complete {
        return mismatch("current_node/is_complete");
    }
    Ok(())
}

/// Digest over the per-artifact hashes, keyed by file name.
fn report_digest(contents: &[&[u8]; 3]) -> Result<ContentHash, CanonError> {
    let mut basis = serde_json::Map::new();
    for (name, content) in ARTIFACT_FILENAMES.iter().zip(contents) {
        let hash = canonical_hash(HashDomain::ReportArtifact, content);
        basis.insert((*name).to_string(), serde_json::Value::from(hash.as_str()));
    }
    let bytes = canonical_json_bytes(&serde_json::Value::Object(basis))?;
    Ok(canonical_hash(HashDomain::ReportDigest, &bytes))
}

fn check_binding(
    name: &str,
    found: &str,
    expected: &ContentHash,
) -> Result<(), ReportDirReadError> {
    if found == expected.as_str() {
        Ok(())
    } else {
        Err(ReportDirReadError::GraphMismatch {
            name: name.to_string(),
            found: found.to_string(),
            expected: expected.as_str().to_string(),
        })
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    name: &str,
    bytes: &[u8],
) -> Result<T, ReportDirReadError> {
    serde_json::from_slice(bytes).map_err(|e| ReportDirReadError::Decode {
        name: name.to_string(),
        detail: e.to_string(),
    })
}

fn read_artifact(dir: &Path, name: &str) -> Result<Vec<u8>, ReportDirReadError> {
    std::fs::read(dir.join(name)).map_err(|_| ReportDirReadError::MissingArtifact {
        name: name.to_string(),
    })
}

/// Write via temp file + rename so readers never see a half-written file.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ReportDirWriteError> {
    let io_err = |source| ReportDirWriteError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = path.with_file_name(format!(".tmp_{file_name}"));
    std::fs::write(&temp_path, content).map_err(io_err)?;
    std::fs::rename(&temp_path, path).map_err(io_err)
}
