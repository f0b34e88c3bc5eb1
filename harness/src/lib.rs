//! bfstep harness: runs the traversal engine for a presentation layer.
//!
//! The harness loads a run config, drives the engine one step at a time
//! under a step budget, and packages what a viewer needs: the per-step
//! transcript, a resumable final state, and text renderings.
//!
//! The harness does NOT implement traversal logic. It delegates to
//! `bfstep-search` and only owns orchestration and persistence.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod fixtures;
pub mod policy;
pub mod render;
pub mod report_dir;
pub mod runner;
pub mod transcript;
