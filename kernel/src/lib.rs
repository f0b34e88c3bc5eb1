//! bfstep kernel: the immutable graph store and the canonical
//! serialization/hashing every other crate builds on.
//!
//! # Module dependency direction
//!
//! `proof` ← `store`
//!
//! `store` uses `proof` to compute graph digests; `proof` depends on nothing
//! internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod proof;
pub mod store;
