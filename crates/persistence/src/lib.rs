//! Persistence layer for the Campus Events backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations
//!
//! Uniqueness and capacity rules are enforced at the schema level (unique
//! constraints, guarded inserts), so concurrent writers cannot slip past the
//! domain-layer checks.

pub mod db;
pub mod entities;
pub mod metrics;
pub mod repositories;
