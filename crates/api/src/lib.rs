//! HTTP API for the campus events platform.
//!
//! Routing, authentication gates, and request/response shaping live here;
//! business rules live in the `domain` crate and SQL in `persistence`.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod services;
