//! Request DTOs with validation.
//!
//! Authentication is external, so the caller identifies itself with a
//! `user_id` carried in the body or query string; the services resolve it
//! against the user directory before any permission check.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use sitereport_entity::{Permission, Role};

/// Acquire a page lock.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLockRequest {
    /// The page to lock.
    pub page_id: Uuid,
    /// The report the page belongs to.
    pub report_id: Uuid,
    /// The requesting user.
    pub user_id: Uuid,
    /// Display name; defaults to the directory record's name.
    #[validate(length(min = 1, max = 100))]
    pub user_name: Option<String>,
    /// Free-text reason shown to users hitting the lock.
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

/// What to do with an existing lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockAction {
    /// Push the lease deadline out.
    Extend,
    /// Give the lock up (holder, or privileged).
    Release,
    /// Take the lock away from its holder (privileged only).
    ForceUnlock,
}

/// Act on a lock: `PUT /api/locks/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockActionRequest {
    /// The acting user.
    pub user_id: Uuid,
    /// The action to perform.
    pub action: LockAction,
    /// Extra minutes for `extend`; defaults to the configured lease length.
    pub additional_minutes: Option<i64>,
}

/// Identifies the caller on query-string routes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActorQuery {
    /// The acting user.
    pub user_id: Uuid,
}

/// Query for the authenticated share listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShareListQuery {
    /// The report to list shares for.
    pub report_id: Uuid,
    /// The acting user.
    pub user_id: Uuid,
}

/// Create a share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareRequest {
    /// The report to share.
    pub report_id: Uuid,
    /// The grantor.
    pub user_id: Uuid,
    /// Direct recipients; required for private shares.
    #[serde(default)]
    pub shared_with: HashSet<Uuid>,
    /// Permissions to grant; defaults to read-only.
    pub permissions: Option<HashSet<Permission>>,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
    /// Mint a token link anyone can use.
    #[serde(default)]
    pub is_public: bool,
}

/// Update a share. Absent fields are left unchanged; an explicit
/// `"expires_at": null` clears the deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateShareRequest {
    /// The acting user.
    pub user_id: Uuid,
    /// Replace the recipient set.
    pub shared_with: Option<HashSet<Uuid>>,
    /// Replace the granted permissions.
    pub permissions: Option<HashSet<Permission>>,
    /// Replace (`Some(Some(_))`) or clear (`Some(None)`) the expiry.
    #[serde(default, deserialize_with = "double_option")]
    pub expires_at: Option<Option<DateTime<Utc>>>,
    /// Toggle public visibility.
    pub is_public: Option<bool>,
}

/// Create or replace a user-permissions record (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpsertUserRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub user_name: String,
    /// Role to bind; the permission set follows from it.
    pub role: Role,
    /// Projects the user may act on.
    #[serde(default)]
    pub project_ids: HashSet<Uuid>,
    /// Construction sites the user may act on.
    #[serde(default)]
    pub construction_ids: HashSet<Uuid>,
}

/// Distinguishes an absent field from an explicit `null`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
