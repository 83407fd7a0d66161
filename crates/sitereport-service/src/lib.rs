//! # sitereport-service
//!
//! Coordination layer for SiteReport. Each service resolves the caller
//! through the user directory, evaluates the permission checker, and only
//! then touches a registry — registries themselves never see the checker.
//!
//! ## Modules
//!
//! - `lock` — page-lock operations (acquire, extend, release, force-unlock, list)
//! - `share` — report-share operations and the grant whitelist
//! - `user` — user-permissions management and startup bootstrap

pub mod lock;
pub mod share;
pub mod user;

pub use lock::LockService;
pub use share::ShareService;
pub use user::UserService;
