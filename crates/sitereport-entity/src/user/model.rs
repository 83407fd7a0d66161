//! User permission record.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::permission::Permission;
use crate::user::role::Role;

/// Binds a user identifier to a role, the permission set derived from that
/// role, and the project/construction scopes the user may act on.
///
/// The `permissions` field always equals the role table entry for `role`;
/// the user directory re-derives it on every write so it can never drift
/// into a per-user customization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPermissions {
    /// User identifier (opaque, produced by the external login layer).
    pub user_id: Uuid,
    /// Display name.
    pub user_name: String,
    /// The user's role.
    pub role: Role,
    /// Permission set derived from `role`.
    pub permissions: HashSet<Permission>,
    /// Projects the user may act on.
    pub project_ids: HashSet<Uuid>,
    /// Construction sites the user may act on.
    pub construction_ids: HashSet<Uuid>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl UserPermissions {
    /// Check whether the user holds the given permission.
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}
