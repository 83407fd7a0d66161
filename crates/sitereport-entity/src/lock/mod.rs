//! Page-lock models.

pub mod model;

pub use model::{LockFilter, LockStatus, PageLock};
