//! User-permissions management service.
//!
//! Writes to the directory always re-derive the permission set from the
//! role table, so a record can never carry a customized set.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sitereport_auth::rbac::checker::PermissionChecker;
use sitereport_core::config::BootstrapConfig;
use sitereport_core::error::AppError;
use sitereport_core::result::AppResult;
use sitereport_entity::permission::Permission;
use sitereport_entity::user::{Role, UserPermissions};
use sitereport_registry::user::directory::UserDirectory;

/// Request to create or replace a user-permissions record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertUserRequest {
    /// Display name.
    pub user_name: String,
    /// The role to bind; the permission set follows from this.
    pub role: Role,
    /// Projects the user may act on.
    #[serde(default)]
    pub project_ids: HashSet<Uuid>,
    /// Construction sites the user may act on.
    #[serde(default)]
    pub construction_ids: HashSet<Uuid>,
}

/// Coordinates user-permissions management.
#[derive(Clone)]
pub struct UserService {
    /// The user directory.
    directory: Arc<UserDirectory>,
    /// RBAC evaluator.
    checker: Arc<PermissionChecker>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(directory: Arc<UserDirectory>, checker: Arc<PermissionChecker>) -> Self {
        Self { directory, checker }
    }

    async fn resolve_user(&self, user_id: Uuid) -> AppResult<UserPermissions> {
        self.directory
            .find(user_id)
            .await
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    fn build_record(&self, user_id: Uuid, request: UpsertUserRequest) -> UserPermissions {
        let now = Utc::now();
        UserPermissions {
            user_id,
            user_name: request.user_name,
            role: request.role,
            permissions: self.checker.policies().permissions_for_role(&request.role),
            project_ids: request.project_ids,
            construction_ids: request.construction_ids,
            created_at: now,
            updated_at: now,
        }
    }

    /// Seed the initial administrator so the management endpoints are
    /// reachable on a fresh process.
    pub async fn bootstrap_admin(
        &self,
        config: &BootstrapConfig,
    ) -> AppResult<Option<UserPermissions>> {
        if !config.enabled {
            return Ok(None);
        }

        let admin_id = config.admin_id.unwrap_or_else(Uuid::new_v4);
        if self.directory.find(admin_id).await.is_some() {
            return Ok(None);
        }

        let admin = self.build_record(
            admin_id,
            UpsertUserRequest {
                user_name: config.admin_name.clone(),
                role: Role::Admin,
                project_ids: HashSet::new(),
                construction_ids: HashSet::new(),
            },
        );
        let admin = self.directory.upsert(admin).await?;
        info!(user_id = %admin.user_id, "Bootstrap admin seeded");
        Ok(Some(admin))
    }

    /// Create or replace a user record. Requires `ManageUsers`.
    pub async fn upsert(
        &self,
        actor_id: Uuid,
        user_id: Uuid,
        request: UpsertUserRequest,
    ) -> AppResult<UserPermissions> {
        let actor = self.resolve_user(actor_id).await?;
        self.checker
            .require_permission(&actor, Permission::ManageUsers)?;

        let mut record = self.build_record(user_id, request);
        if let Some(existing) = self.directory.find(user_id).await {
            record.created_at = existing.created_at;
        }
        self.directory.upsert(record).await
    }

    /// Fetch a user record: self-lookup, or any record with `ManageUsers`.
    pub async fn get(&self, actor_id: Uuid, user_id: Uuid) -> AppResult<UserPermissions> {
        let actor = self.resolve_user(actor_id).await?;
        if actor.user_id != user_id {
            self.checker
                .require_permission(&actor, Permission::ManageUsers)?;
        }
        self.resolve_user(user_id).await
    }

    /// List all user records. Requires `ManageUsers`.
    pub async fn list(&self, actor_id: Uuid) -> AppResult<Vec<UserPermissions>> {
        let actor = self.resolve_user(actor_id).await?;
        self.checker
            .require_permission(&actor, Permission::ManageUsers)?;
        Ok(self.directory.list().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: Role) -> UpsertUserRequest {
        UpsertUserRequest {
            user_name: "Sato".to_string(),
            role,
            project_ids: HashSet::new(),
            construction_ids: HashSet::new(),
        }
    }

    async fn fixture() -> (UserService, Uuid) {
        let service = UserService::new(
            Arc::new(UserDirectory::new()),
            Arc::new(PermissionChecker::new()),
        );
        let admin = service
            .bootstrap_admin(&BootstrapConfig::default())
            .await
            .unwrap()
            .expect("admin seeded");
        (service, admin.user_id)
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let (service, admin_id) = fixture().await;
        let config = BootstrapConfig {
            admin_id: Some(admin_id),
            ..BootstrapConfig::default()
        };
        assert!(service.bootstrap_admin(&config).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_permissions_always_derived_from_role() {
        let (service, admin_id) = fixture().await;
        let user_id = Uuid::new_v4();
        let record = service
            .upsert(admin_id, user_id, request(Role::Engineer))
            .await
            .unwrap();
        assert_eq!(
            record.permissions,
            PermissionChecker::new()
                .policies()
                .permissions_for_role(&Role::Engineer)
        );
    }

    #[tokio::test]
    async fn test_non_admin_cannot_manage_users() {
        let (service, admin_id) = fixture().await;
        let engineer = Uuid::new_v4();
        service
            .upsert(admin_id, engineer, request(Role::Engineer))
            .await
            .unwrap();

        let err = service
            .upsert(engineer, Uuid::new_v4(), request(Role::Viewer))
            .await
            .unwrap_err();
        assert_eq!(err.kind, sitereport_core::error::ErrorKind::Forbidden);

        // Self-lookup is fine; looking up others is not.
        assert!(service.get(engineer, engineer).await.is_ok());
        let err = service.get(engineer, admin_id).await.unwrap_err();
        assert_eq!(err.kind, sitereport_core::error::ErrorKind::Forbidden);
    }
}
