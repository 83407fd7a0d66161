//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use sitereport_entity::permission::Permission;
use sitereport_entity::user::Role;

/// Defines the mapping from each role to its set of permissions.
///
/// The table is fixed: a user's effective permissions are always exactly
/// the entry for their role, never partially customized per user.
#[derive(Debug, Clone)]
pub struct RolePermissions {
    /// Role → set of permissions.
    policies: HashMap<Role, HashSet<Permission>>,
}

impl RolePermissions {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        // Viewer: read and export only
        let viewer: HashSet<Permission> = [Permission::ReadReports, Permission::ExportReports]
            .into_iter()
            .collect();
        policies.insert(Role::Viewer, viewer);

        // Engineer: viewer + author reports and lock the pages they edit
        let engineer: HashSet<Permission> = [
            Permission::ReadReports,
            Permission::CreateReports,
            Permission::EditReports,
            Permission::DeleteReports,
            Permission::ExportReports,
            Permission::LockPages,
        ]
        .into_iter()
        .collect();
        policies.insert(Role::Engineer, engineer);

        // Manager: engineer + templates, approval, unlocking, sharing
        let manager: HashSet<Permission> = [
            Permission::ReadReports,
            Permission::CreateReports,
            Permission::EditReports,
            Permission::DeleteReports,
            Permission::ManageTemplates,
            Permission::ExportReports,
            Permission::ApproveReports,
            Permission::LockPages,
            Permission::UnlockPages,
            Permission::ShareReports,
        ]
        .into_iter()
        .collect();
        policies.insert(Role::Manager, manager);

        // Admin: everything
        let admin: HashSet<Permission> = [
            Permission::ReadReports,
            Permission::CreateReports,
            Permission::EditReports,
            Permission::DeleteReports,
            Permission::ManageTemplates,
            Permission::ManageUsers,
            Permission::ManageProjects,
            Permission::ExportReports,
            Permission::ApproveReports,
            Permission::LockPages,
            Permission::UnlockPages,
            Permission::ShareReports,
        ]
        .into_iter()
        .collect();
        policies.insert(Role::Admin, admin);

        Self { policies }
    }

    /// Returns the set of permissions for the given role.
    pub fn permissions_for_role(&self, role: &Role) -> HashSet<Permission> {
        self.policies.get(role).cloned().unwrap_or_default()
    }

    /// Checks whether the given role has the specified permission.
    pub fn has_permission(&self, role: &Role, permission: Permission) -> bool {
        self.policies
            .get(role)
            .map(|perms| perms.contains(&permission))
            .unwrap_or(false)
    }
}

impl Default for RolePermissions {
    fn default() -> Self {
        Self::new()
    }
}
