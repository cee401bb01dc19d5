//! Infrastructure layer
//!
//! Concrete implementations of the domain repositories: the metadata tool
//! client and local scratch storage.

pub mod metadata;
pub mod persistence;
