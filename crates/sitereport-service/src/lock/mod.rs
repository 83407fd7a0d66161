//! Page-lock coordination.

pub mod service;

pub use service::{AcquireLockRequest, LockService, LockView};
