//! Permission evaluation — pure functions of the caller's record and the
//! resource ownership in question.

use uuid::Uuid;

use sitereport_core::error::AppError;
use sitereport_entity::permission::Permission;
use sitereport_entity::user::UserPermissions;

use super::policies::RolePermissions;

/// Evaluates authorization decisions for the access-control boundary.
///
/// Holds no state beyond the role table and performs no I/O; callers
/// resolve the [`UserPermissions`] record first and pass it in.
#[derive(Debug, Clone)]
pub struct PermissionChecker {
    /// The role→permission table.
    policies: RolePermissions,
}

impl PermissionChecker {
    /// Creates a new checker with the default role table.
    pub fn new() -> Self {
        Self {
            policies: RolePermissions::new(),
        }
    }

    /// Returns a reference to the underlying role table.
    pub fn policies(&self) -> &RolePermissions {
        &self.policies
    }

    /// Checks whether the user holds the given permission.
    pub fn has_permission(&self, user: &UserPermissions, permission: Permission) -> bool {
        user.has_permission(permission)
    }

    /// Checks the permission, returning `Err(Forbidden)` when denied.
    pub fn require_permission(
        &self,
        user: &UserPermissions,
        permission: Permission,
    ) -> Result<(), AppError> {
        if self.has_permission(user, permission) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{}' does not have permission '{}'",
                user.role, permission
            )))
        }
    }

    /// Whether the user may act on the given project.
    ///
    /// Admins see every project; everyone else is limited to their scopes.
    pub fn can_access_project(&self, user: &UserPermissions, project_id: Uuid) -> bool {
        user.role.is_admin() || user.project_ids.contains(&project_id)
    }

    /// Whether the user may act on the given construction site.
    pub fn can_access_construction(&self, user: &UserPermissions, construction_id: Uuid) -> bool {
        user.role.is_admin() || user.construction_ids.contains(&construction_id)
    }

    /// Whether the user may edit a report owned by `owner_id`.
    ///
    /// Requires the edit permission, plus ownership or a manager-or-above
    /// role.
    pub fn can_edit_report(&self, user: &UserPermissions, owner_id: Uuid) -> bool {
        self.has_permission(user, Permission::EditReports)
            && (user.user_id == owner_id || user.role.is_manager_or_above())
    }

    /// Whether the user may delete a report owned by `owner_id`.
    ///
    /// Stricter than editing: only admins may delete reports they do not
    /// own — a manager cannot.
    pub fn can_delete_report(&self, user: &UserPermissions, owner_id: Uuid) -> bool {
        self.has_permission(user, Permission::DeleteReports)
            && (user.user_id == owner_id || user.role.is_admin())
    }

    /// Whether the user may release the lock held by `lock_owner_id`.
    ///
    /// Requires the unlock permission. Admins and managers may release any
    /// lock; anyone else only their own.
    pub fn can_unlock_page(&self, user: &UserPermissions, lock_owner_id: Option<Uuid>) -> bool {
        if !self.has_permission(user, Permission::UnlockPages) {
            return false;
        }
        if user.role.is_manager_or_above() {
            return true;
        }
        lock_owner_id == Some(user.user_id)
    }

    /// Whether the user may acquire page locks.
    pub fn can_lock_page(&self, user: &UserPermissions) -> bool {
        self.has_permission(user, Permission::LockPages)
    }

    /// Whether the user may share reports.
    pub fn can_share_report(&self, user: &UserPermissions) -> bool {
        self.has_permission(user, Permission::ShareReports)
    }

    /// Whether the user may approve reports.
    pub fn can_approve_report(&self, user: &UserPermissions) -> bool {
        self.has_permission(user, Permission::ApproveReports)
    }
}

impl Default for PermissionChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sitereport_entity::user::Role;
    use std::collections::HashSet;

    fn user_with_role(role: Role) -> UserPermissions {
        let now = Utc::now();
        UserPermissions {
            user_id: Uuid::new_v4(),
            user_name: format!("{role} user"),
            role,
            permissions: RolePermissions::new().permissions_for_role(&role),
            project_ids: HashSet::new(),
            construction_ids: HashSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_project_scope_or_admin() {
        let checker = PermissionChecker::new();
        let project = Uuid::new_v4();

        let mut engineer = user_with_role(Role::Engineer);
        assert!(!checker.can_access_project(&engineer, project));
        engineer.project_ids.insert(project);
        assert!(checker.can_access_project(&engineer, project));

        let admin = user_with_role(Role::Admin);
        assert!(checker.can_access_project(&admin, project));
    }

    #[test]
    fn test_manager_edits_but_cannot_delete_others_reports() {
        let checker = PermissionChecker::new();
        let manager = user_with_role(Role::Manager);
        let someone_else = Uuid::new_v4();

        assert!(checker.can_edit_report(&manager, someone_else));
        assert!(!checker.can_delete_report(&manager, someone_else));
        assert!(checker.can_delete_report(&manager, manager.user_id));
    }

    #[test]
    fn test_admin_deletes_anything() {
        let checker = PermissionChecker::new();
        let admin = user_with_role(Role::Admin);
        assert!(checker.can_delete_report(&admin, Uuid::new_v4()));
    }

    #[test]
    fn test_viewer_cannot_edit_own_report() {
        // The ownership clause never substitutes for the base permission.
        let checker = PermissionChecker::new();
        let viewer = user_with_role(Role::Viewer);
        assert!(!checker.can_edit_report(&viewer, viewer.user_id));
    }

    #[test]
    fn test_unlock_matrix() {
        let checker = PermissionChecker::new();
        let manager = user_with_role(Role::Manager);
        let engineer = user_with_role(Role::Engineer);
        let viewer = user_with_role(Role::Viewer);
        let stranger = Uuid::new_v4();

        // Manager holds UnlockPages and bypasses ownership.
        assert!(checker.can_unlock_page(&manager, Some(stranger)));
        // Engineer lacks UnlockPages entirely, even for their own lock.
        assert!(!checker.can_unlock_page(&engineer, Some(engineer.user_id)));
        // Viewer lacks it too, regardless of ownership.
        assert!(!checker.can_unlock_page(&viewer, Some(stranger)));
    }

    #[test]
    fn test_require_permission_error_kind() {
        let checker = PermissionChecker::new();
        let viewer = user_with_role(Role::Viewer);
        let err = checker
            .require_permission(&viewer, Permission::LockPages)
            .unwrap_err();
        assert_eq!(err.kind, sitereport_core::error::ErrorKind::Forbidden);
    }
}
