//! Lock coordination service.
//!
//! Validates caller permissions against the RBAC checker before any
//! registry mutation, and shapes returned locks into views carrying the
//! derived remaining-time fields.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sitereport_auth::rbac::checker::PermissionChecker;
use sitereport_core::config::lock::LockConfig;
use sitereport_core::error::AppError;
use sitereport_core::result::AppResult;
use sitereport_entity::lock::model::format_remaining;
use sitereport_entity::lock::{LockFilter, PageLock};
use sitereport_entity::permission::Permission;
use sitereport_entity::user::UserPermissions;
use sitereport_registry::lock::registry::{AcquireRequest, LockRegistry};
use sitereport_registry::user::directory::UserDirectory;

/// Request to acquire a page lock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquireLockRequest {
    /// The page to lock.
    pub page_id: Uuid,
    /// The report the page belongs to.
    pub report_id: Uuid,
    /// The requesting user.
    pub user_id: Uuid,
    /// Display name; the directory record's name is used when absent.
    pub user_name: Option<String>,
    /// Optional free-text reason.
    pub reason: Option<String>,
}

/// A lock together with its derived lease fields, as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockView {
    /// The lock record.
    #[serde(flatten)]
    pub lock: PageLock,
    /// Seconds left on the lease, floored at zero.
    pub remaining_seconds: i64,
    /// Human-readable remaining time ("Nm Ss" or "Ss").
    pub remaining: String,
    /// Whether the lease is live but inside the warning threshold.
    pub is_expiring_soon: bool,
}

/// Coordinates page-lock operations.
#[derive(Clone)]
pub struct LockService {
    /// User directory for caller resolution.
    directory: Arc<UserDirectory>,
    /// RBAC evaluator.
    checker: Arc<PermissionChecker>,
    /// The lock store.
    registry: Arc<dyn LockRegistry>,
    /// Lease settings (for the expiring-soon threshold).
    config: LockConfig,
}

impl LockService {
    /// Creates a new lock service.
    pub fn new(
        directory: Arc<UserDirectory>,
        checker: Arc<PermissionChecker>,
        registry: Arc<dyn LockRegistry>,
        config: LockConfig,
    ) -> Self {
        Self {
            directory,
            checker,
            registry,
            config,
        }
    }

    /// Resolves the caller, keeping "user not found" distinct from
    /// "permission denied".
    async fn resolve_user(&self, user_id: Uuid) -> AppResult<UserPermissions> {
        self.directory
            .find(user_id)
            .await
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    fn view(&self, lock: PageLock) -> LockView {
        let now = Utc::now();
        let remaining = lock.remaining(now);
        let threshold = Duration::minutes(self.config.expiring_soon_minutes);
        LockView {
            remaining_seconds: remaining.num_seconds(),
            remaining: format_remaining(remaining),
            is_expiring_soon: lock.is_expiring_soon(now, threshold),
            lock,
        }
    }

    /// Acquire a lock on a page. Requires `LockPages`.
    pub async fn acquire(&self, request: AcquireLockRequest) -> AppResult<LockView> {
        let user = self.resolve_user(request.user_id).await?;

        if !self.checker.can_lock_page(&user) {
            return Err(AppError::forbidden(
                "You do not have permission to lock pages",
            ));
        }

        let user_name = request.user_name.unwrap_or_else(|| user.user_name.clone());
        let lock = self
            .registry
            .acquire(AcquireRequest {
                page_id: request.page_id,
                report_id: request.report_id,
                user_id: request.user_id,
                user_name,
                reason: request.reason,
            })
            .await?;

        Ok(self.view(lock))
    }

    /// Extend a lease. The caller must be the holder or hold privileged
    /// unlock rights.
    pub async fn extend(
        &self,
        lock_id: Uuid,
        user_id: Uuid,
        additional_minutes: Option<i64>,
    ) -> AppResult<LockView> {
        let user = self.resolve_user(user_id).await?;
        let lock = self.registry.get(lock_id).await?;

        if lock.user_id != user.user_id && !self.checker.can_unlock_page(&user, Some(lock.user_id))
        {
            return Err(AppError::forbidden(
                "Only the lock holder or a manager may extend this lock",
            ));
        }

        let lock = self.registry.extend(lock_id, additional_minutes).await?;
        Ok(self.view(lock))
    }

    /// Release a lock. The caller must be the holder or hold privileged
    /// unlock rights.
    pub async fn release(&self, lock_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let user = self.resolve_user(user_id).await?;
        let lock = self.registry.get(lock_id).await?;

        if lock.user_id != user.user_id && !self.checker.can_unlock_page(&user, Some(lock.user_id))
        {
            return Err(AppError::forbidden(
                "Only the lock holder or a manager may release this lock",
            ));
        }

        self.registry.release(lock_id).await?;
        info!(lock_id = %lock_id, user_id = %user_id, "Lock released by coordinator");
        Ok(())
    }

    /// Force-release a lock regardless of who holds it.
    ///
    /// No ownership bypass: this path is for admins and managers only.
    pub async fn force_unlock(&self, lock_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let user = self.resolve_user(user_id).await?;

        if !self.checker.can_unlock_page(&user, None) {
            return Err(AppError::forbidden(
                "You do not have permission to force-unlock pages",
            ));
        }

        let lock = self.registry.release(lock_id).await?;
        info!(
            lock_id = %lock_id,
            holder_id = %lock.user_id,
            forced_by = %user_id,
            "Lock force-released"
        );
        Ok(())
    }

    /// List live locks matching the filter, with derived lease fields.
    pub async fn list(&self, filter: LockFilter) -> AppResult<Vec<LockView>> {
        let locks = self.registry.list(filter).await?;
        Ok(locks.into_iter().map(|lock| self.view(lock)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitereport_auth::rbac::policies::RolePermissions;
    use sitereport_entity::user::Role;
    use sitereport_registry::lock::memory::MemoryLockRegistry;
    use std::collections::HashSet;

    struct Fixture {
        service: LockService,
        directory: Arc<UserDirectory>,
    }

    async fn fixture() -> Fixture {
        let directory = Arc::new(UserDirectory::new());
        let service = LockService::new(
            Arc::clone(&directory),
            Arc::new(PermissionChecker::new()),
            Arc::new(MemoryLockRegistry::new(LockConfig::default())),
            LockConfig::default(),
        );
        Fixture { service, directory }
    }

    async fn seed_user(directory: &UserDirectory, role: Role) -> Uuid {
        let now = Utc::now();
        let user_id = Uuid::new_v4();
        directory
            .upsert(UserPermissions {
                user_id,
                user_name: format!("{role}-{user_id}"),
                role,
                permissions: RolePermissions::new().permissions_for_role(&role),
                project_ids: HashSet::new(),
                construction_ids: HashSet::new(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        user_id
    }

    fn acquire_request(page_id: Uuid, user_id: Uuid) -> AcquireLockRequest {
        AcquireLockRequest {
            page_id,
            report_id: Uuid::new_v4(),
            user_id,
            user_name: None,
            reason: None,
        }
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found_not_forbidden() {
        let f = fixture().await;
        let err = f
            .service
            .acquire(acquire_request(Uuid::new_v4(), Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, sitereport_core::error::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_viewer_cannot_acquire() {
        let f = fixture().await;
        let viewer = seed_user(&f.directory, Role::Viewer).await;
        let err = f
            .service
            .acquire(acquire_request(Uuid::new_v4(), viewer))
            .await
            .unwrap_err();
        assert_eq!(err.kind, sitereport_core::error::ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_engineer_acquires_with_thirty_minute_lease() {
        let f = fixture().await;
        let engineer = seed_user(&f.directory, Role::Engineer).await;
        let view = f
            .service
            .acquire(acquire_request(Uuid::new_v4(), engineer))
            .await
            .unwrap();
        assert!(view.remaining_seconds > 29 * 60);
        assert!(view.remaining_seconds <= 30 * 60);
        assert!(!view.is_expiring_soon);
    }

    #[tokio::test]
    async fn test_conflict_reports_holder_remaining_time() {
        let f = fixture().await;
        let a = seed_user(&f.directory, Role::Engineer).await;
        let b = seed_user(&f.directory, Role::Engineer).await;
        let page = Uuid::new_v4();

        f.service.acquire(acquire_request(page, a)).await.unwrap();
        let err = f
            .service
            .acquire(acquire_request(page, b))
            .await
            .unwrap_err();
        assert_eq!(err.kind, sitereport_core::error::ErrorKind::Conflict);
        assert!(err.details.unwrap()["remaining_seconds"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_release_then_other_user_acquires() {
        let f = fixture().await;
        let a = seed_user(&f.directory, Role::Engineer).await;
        let b = seed_user(&f.directory, Role::Engineer).await;
        let page = Uuid::new_v4();

        let view = f.service.acquire(acquire_request(page, a)).await.unwrap();
        f.service.release(view.lock.id, a).await.unwrap();
        assert!(f.service.acquire(acquire_request(page, b)).await.is_ok());
    }

    #[tokio::test]
    async fn test_engineer_cannot_release_others_lock() {
        let f = fixture().await;
        let a = seed_user(&f.directory, Role::Engineer).await;
        let b = seed_user(&f.directory, Role::Engineer).await;

        let view = f
            .service
            .acquire(acquire_request(Uuid::new_v4(), a))
            .await
            .unwrap();
        let err = f.service.release(view.lock.id, b).await.unwrap_err();
        assert_eq!(err.kind, sitereport_core::error::ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_force_unlock_matrix() {
        let f = fixture().await;
        let engineer = seed_user(&f.directory, Role::Engineer).await;
        let manager = seed_user(&f.directory, Role::Manager).await;
        let viewer = seed_user(&f.directory, Role::Viewer).await;

        let view = f
            .service
            .acquire(acquire_request(Uuid::new_v4(), engineer))
            .await
            .unwrap();

        // A viewer cannot force-unlock, regardless of anything.
        let err = f.service.force_unlock(view.lock.id, viewer).await.unwrap_err();
        assert_eq!(err.kind, sitereport_core::error::ErrorKind::Forbidden);

        // The holder cannot use the force path either — it has no
        // ownership bypass.
        let err = f
            .service
            .force_unlock(view.lock.id, engineer)
            .await
            .unwrap_err();
        assert_eq!(err.kind, sitereport_core::error::ErrorKind::Forbidden);

        // A manager can, without holding the lock.
        f.service.force_unlock(view.lock.id, manager).await.unwrap();
    }

    #[tokio::test]
    async fn test_manager_extends_someone_elses_lock() {
        let f = fixture().await;
        let engineer = seed_user(&f.directory, Role::Engineer).await;
        let manager = seed_user(&f.directory, Role::Manager).await;

        let view = f
            .service
            .acquire(acquire_request(Uuid::new_v4(), engineer))
            .await
            .unwrap();
        let extended = f
            .service
            .extend(view.lock.id, manager, Some(15))
            .await
            .unwrap();
        assert_eq!(
            extended.lock.expires_at,
            view.lock.expires_at + Duration::minutes(15)
        );
    }
}
