//! Report-share coordination.

pub mod service;

pub use service::{CreateShareRequest, ShareService, UpdateShareRequest};
