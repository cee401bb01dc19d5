//! Domain layer - Core extraction logic
//!
//! Entities, repository traits and the pure services that scan, validate,
//! correlate and summarize compiled asset catalogs.

pub mod entities;
pub mod repositories;
pub mod services;
