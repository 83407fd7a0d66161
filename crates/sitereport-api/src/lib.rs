//! # sitereport-api
//!
//! HTTP API layer for SiteReport built on Axum.
//!
//! Provides the REST endpoints for page locks, report shares, and user
//! permission management, plus middleware (CORS, logging), DTOs, and
//! error mapping.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
