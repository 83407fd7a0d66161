//! User role and permission-record models.

pub mod model;
pub mod role;

pub use model::UserPermissions;
pub use role::Role;
