//! # sitereport-auth
//!
//! Role-based access control for SiteReport.
//!
//! ## Modules
//!
//! - `rbac` — the fixed role→permission table and the pure
//!   `PermissionChecker` evaluator
//!
//! This crate performs no I/O; every decision is a pure function of the
//! caller's [`UserPermissions`](sitereport_entity::UserPermissions) record
//! and the resource ownership passed in. State mutation lives in the
//! registry crate, and the two never call each other.

pub mod rbac;

pub use rbac::{PermissionChecker, RolePermissions};
