//! HTTP request handlers, one module per domain.

pub mod health;
pub mod lock;
pub mod share;
pub mod user;
