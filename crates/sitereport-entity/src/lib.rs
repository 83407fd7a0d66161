//! # sitereport-entity
//!
//! Domain models for SiteReport: user roles and permissions, page locks,
//! and report shares. Pure data types; all lifecycle and authorization
//! logic lives in the registry and service crates.

pub mod lock;
pub mod permission;
pub mod share;
pub mod user;

pub use lock::{LockFilter, LockStatus, PageLock};
pub use permission::Permission;
pub use share::ShareSettings;
pub use user::{Role, UserPermissions};
