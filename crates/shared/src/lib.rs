//! Shared utilities and common types for the Campus Events backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT issuance and validation for admin/student identities
//! - Password hashing with Argon2id (admin credentials)
//! - Common validation logic (email domains, ratings)

pub mod jwt;
pub mod password;
pub mod validation;
