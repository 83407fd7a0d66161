//! User-permissions directory.
//!
//! Authentication is external; this directory maps the opaque user ids the
//! login layer produces onto [`UserPermissions`] records. `find` returns an
//! `Option` so callers can keep "user not found" (404) distinct from
//! "permission denied" (403).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use sitereport_core::result::AppResult;
use sitereport_entity::user::UserPermissions;

/// In-memory store of user permission records.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    /// User id → record.
    users: Arc<RwLock<HashMap<Uuid, UserPermissions>>>,
}

impl UserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a user record.
    pub async fn find(&self, user_id: Uuid) -> Option<UserPermissions> {
        self.users.read().await.get(&user_id).cloned()
    }

    /// Inserts or replaces a user record.
    ///
    /// Callers are expected to have derived `permissions` from the role
    /// table; the directory stores records verbatim.
    pub async fn upsert(&self, user: UserPermissions) -> AppResult<UserPermissions> {
        let mut users = self.users.write().await;
        info!(
            user_id = %user.user_id,
            role = %user.role,
            "User permissions record stored"
        );
        users.insert(user.user_id, user.clone());
        Ok(user)
    }

    /// Removes a user record; returns whether it existed.
    pub async fn remove(&self, user_id: Uuid) -> bool {
        self.users.write().await.remove(&user_id).is_some()
    }

    /// Lists all user records.
    pub async fn list(&self) -> Vec<UserPermissions> {
        let users = self.users.read().await;
        let mut all: Vec<UserPermissions> = users.values().cloned().collect();
        all.sort_by_key(|u| u.created_at);
        all
    }
}
