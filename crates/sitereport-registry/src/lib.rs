//! # sitereport-registry
//!
//! Stateful components for SiteReport:
//!
//! - `lock` — the page-lock registry trait and its in-memory,
//!   mutex-guarded implementation (lease lifecycle and lazy expiry)
//! - `share` — the report-share registry trait and its in-memory
//!   implementation, plus share-token generation
//! - `user` — the in-memory user directory
//!
//! Registries own record lifecycle only. They never evaluate permissions;
//! all authorization happens in the service layer before a registry is
//! touched.

pub mod lock;
pub mod share;
pub mod user;

pub use lock::{AcquireRequest, LockRegistry, MemoryLockRegistry};
pub use share::{MemoryShareRegistry, ShareRegistry, ShareTokenGenerator};
pub use user::UserDirectory;
