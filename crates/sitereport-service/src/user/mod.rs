//! User-permissions management.

pub mod service;

pub use service::{UpsertUserRequest, UserService};
