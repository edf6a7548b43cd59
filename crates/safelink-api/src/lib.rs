//! # safelink-api
//!
//! HTTP API layer for SafeLink built on Axum.
//!
//! Provides the link endpoints (generate, inspect, unlock, validate), the
//! health check, middleware (CORS, compression, logging), DTOs, and error
//! mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
