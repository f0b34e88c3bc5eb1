//! Immutable graph store: labeled nodes, undirected edges, ordered
//! neighbor lookup.

pub mod error;
pub mod graph_store;
pub mod matrix;

pub use error::{InvalidGraphError, UnknownNodeError};
pub use graph_store::GraphStore;
