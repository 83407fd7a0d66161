//! Share coordination service.
//!
//! Owns the grant whitelist and all share authorization. Validation runs
//! fully before any registry mutation, so a failed create or update never
//! leaves a partial record.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sitereport_auth::rbac::checker::PermissionChecker;
use sitereport_core::error::AppError;
use sitereport_core::result::AppResult;
use sitereport_entity::permission::Permission;
use sitereport_entity::share::ShareSettings;
use sitereport_entity::user::UserPermissions;
use sitereport_registry::share::registry::ShareRegistry;
use sitereport_registry::share::token::ShareTokenGenerator;
use sitereport_registry::user::directory::UserDirectory;

/// Request to create a new share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareRequest {
    /// The report to share.
    pub report_id: Uuid,
    /// The grantor.
    pub shared_by: Uuid,
    /// Direct recipients; ignored (cleared) for public shares.
    #[serde(default)]
    pub shared_with: HashSet<Uuid>,
    /// Permissions to grant; defaults to read-only when absent.
    pub permissions: Option<HashSet<Permission>>,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether anyone holding the minted token may access the share.
    #[serde(default)]
    pub is_public: bool,
}

/// Request to update an existing share. `None` fields are left unchanged;
/// `expires_at` is doubly optional so callers can clear the deadline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateShareRequest {
    /// Replace the recipient set.
    pub shared_with: Option<HashSet<Uuid>>,
    /// Replace the granted permissions (re-checked against the updater's
    /// whitelist).
    pub permissions: Option<HashSet<Permission>>,
    /// Replace or clear the expiry.
    pub expires_at: Option<Option<DateTime<Utc>>>,
    /// Toggle public visibility.
    pub is_public: Option<bool>,
}

/// Coordinates share operations.
#[derive(Clone)]
pub struct ShareService {
    /// User directory for caller resolution.
    directory: Arc<UserDirectory>,
    /// RBAC evaluator.
    checker: Arc<PermissionChecker>,
    /// The share store.
    registry: Arc<dyn ShareRegistry>,
    /// Token generator for public links.
    tokens: ShareTokenGenerator,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        directory: Arc<UserDirectory>,
        checker: Arc<PermissionChecker>,
        registry: Arc<dyn ShareRegistry>,
        tokens: ShareTokenGenerator,
    ) -> Self {
        Self {
            directory,
            checker,
            registry,
            tokens,
        }
    }

    async fn resolve_user(&self, user_id: Uuid) -> AppResult<UserPermissions> {
        self.directory
            .find(user_id)
            .await
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// The permissions this grantor may hand out: read and export for
    /// everyone with share rights; edit and create only for user managers.
    fn allowed_grants(&self, grantor: &UserPermissions) -> HashSet<Permission> {
        let mut allowed: HashSet<Permission> =
            [Permission::ReadReports, Permission::ExportReports]
                .into_iter()
                .collect();
        if self.checker.has_permission(grantor, Permission::ManageUsers) {
            allowed.insert(Permission::EditReports);
            allowed.insert(Permission::CreateReports);
        }
        allowed
    }

    /// Rejects any requested permission outside the grantor's whitelist,
    /// naming the offending permissions rather than silently dropping them.
    fn enforce_grant_whitelist(
        &self,
        grantor: &UserPermissions,
        requested: &HashSet<Permission>,
    ) -> AppResult<()> {
        let allowed = self.allowed_grants(grantor);
        let mut disallowed: Vec<&'static str> = requested
            .difference(&allowed)
            .map(|p| p.as_str())
            .collect();
        disallowed.sort_unstable();

        if disallowed.is_empty() {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "You may not grant the following permissions: {}",
                disallowed.join(", ")
            ))
            .with_details(serde_json::json!({ "disallowed": disallowed })))
        }
    }

    /// Create a share. Requires `ShareReports`.
    pub async fn create(&self, request: CreateShareRequest) -> AppResult<ShareSettings> {
        let grantor = self.resolve_user(request.shared_by).await?;

        if !self.checker.can_share_report(&grantor) {
            return Err(AppError::forbidden(
                "You do not have permission to share reports",
            ));
        }

        let permissions = request
            .permissions
            .unwrap_or_else(|| [Permission::ReadReports].into_iter().collect());
        self.enforce_grant_whitelist(&grantor, &permissions)?;

        if !request.is_public && request.shared_with.is_empty() {
            return Err(AppError::validation(
                "shared_with is required for private shares",
            ));
        }

        let now = Utc::now();
        let share = ShareSettings {
            id: Uuid::new_v4(),
            report_id: request.report_id,
            shared_by: request.shared_by,
            shared_with: if request.is_public {
                HashSet::new()
            } else {
                request.shared_with
            },
            permissions,
            expires_at: request.expires_at,
            is_public: request.is_public,
            share_token: request.is_public.then(|| self.tokens.generate()),
            created_at: now,
            updated_at: now,
        };

        self.registry.insert(share).await
    }

    /// Token access path: the token alone is the credential.
    pub async fn get_by_token(&self, token: &str) -> AppResult<ShareSettings> {
        self.registry.find_by_token(token).await
    }

    /// Authenticated access path: live shares for a report visible to the
    /// caller — grantor, recipient, or a user manager (admin oversight).
    pub async fn list_for_report(
        &self,
        report_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Vec<ShareSettings>> {
        let user = self.resolve_user(user_id).await?;
        let oversight = self.checker.has_permission(&user, Permission::ManageUsers);

        let shares = self.registry.list_for_report(report_id).await?;
        Ok(shares
            .into_iter()
            .filter(|share| oversight || share.involves(user.user_id))
            .collect())
    }

    /// Update a share. Only the original grantor or a user manager may.
    pub async fn update(
        &self,
        share_id: Uuid,
        user_id: Uuid,
        request: UpdateShareRequest,
    ) -> AppResult<ShareSettings> {
        let user = self.resolve_user(user_id).await?;
        let mut share = self.registry.get(share_id).await?;

        if share.shared_by != user.user_id
            && !self.checker.has_permission(&user, Permission::ManageUsers)
        {
            return Err(AppError::forbidden(
                "Only the grantor or an administrator may modify this share",
            ));
        }

        if let Some(ref permissions) = request.permissions {
            self.enforce_grant_whitelist(&user, permissions)?;
        }

        if let Some(permissions) = request.permissions {
            share.permissions = permissions;
        }
        if let Some(shared_with) = request.shared_with {
            share.shared_with = shared_with;
        }
        if let Some(expires_at) = request.expires_at {
            share.expires_at = expires_at;
        }
        if let Some(is_public) = request.is_public {
            share.is_public = is_public;
        }

        // Keep the token invariant: present iff public. Going private
        // clears the token so old links die immediately; going public
        // mints a fresh one.
        if share.is_public {
            if share.share_token.is_none() {
                share.share_token = Some(self.tokens.generate());
            }
            share.shared_with.clear();
        } else {
            share.share_token = None;
        }

        // A private share with nobody in it would be unreachable.
        // Toggling public off must name the new recipients.
        if !share.is_public && share.shared_with.is_empty() {
            return Err(AppError::validation(
                "shared_with is required for private shares",
            ));
        }

        share.updated_at = Utc::now();
        self.registry.update(share).await
    }

    /// Delete a share. Same authorization as update.
    pub async fn delete(&self, share_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let user = self.resolve_user(user_id).await?;
        let share = self.registry.get(share_id).await?;

        if share.shared_by != user.user_id
            && !self.checker.has_permission(&user, Permission::ManageUsers)
        {
            return Err(AppError::forbidden(
                "Only the grantor or an administrator may delete this share",
            ));
        }

        self.registry.remove(share_id).await?;
        info!(share_id = %share_id, user_id = %user_id, "Share deleted by coordinator");
        Ok(())
    }
}
