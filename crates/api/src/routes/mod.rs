//! API route handlers.

pub mod attendance;
pub mod auth;
pub mod colleges;
pub mod events;
pub mod feedback;
pub mod health;
pub mod registrations;
pub mod reports;
pub mod students;
