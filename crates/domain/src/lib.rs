//! Domain layer for the Campus Events backend.
//!
//! This crate contains:
//! - Domain models and request/response DTOs (College, Student, Event, ...)
//! - The rule engines for registration, attendance, and feedback
//! - Reporting math shared by the read-only report endpoints

pub mod models;
pub mod services;
