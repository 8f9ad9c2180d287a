//! HTTP front-end for kubemock.
//!
//! Serves the Kubernetes `tokenreviews` endpoint that consumers call, plus
//! test-only routes to register service accounts, reset the registry, and
//! probe liveness.

pub mod api;
pub mod config;

pub use api::{create_app, create_router, AppState};
pub use config::Config;
