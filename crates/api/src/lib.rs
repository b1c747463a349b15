//! HTTP API layer for unitvisit.
//!
//! This crate provides the REST API of the visit registration portal:
//!
//! - **Endpoints**: public submission/lookup plus the admin dashboard API
//! - **Extractors**: bearer-token authentication
//! - **Middleware**: request authentication
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
