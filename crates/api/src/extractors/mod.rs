//! Request extractors.

pub mod auth_identity;

pub use auth_identity::AuthIdentity;
