//! Role-based access control (RBAC) evaluation.

pub mod checker;
pub mod policies;

pub use checker::PermissionChecker;
pub use policies::RolePermissions;
