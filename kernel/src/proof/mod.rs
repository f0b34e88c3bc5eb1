//! Canonical serialization and domain-separated hashing.
//!
//! Everything that ends up in a digest goes through [`canon`] first and is
//! hashed under a [`hash_domain::HashDomain`].

pub mod canon;
pub mod hash;
pub mod hash_domain;
