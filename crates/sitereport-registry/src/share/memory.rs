//! In-memory share registry using a Tokio mutex for single-node deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use sitereport_core::error::AppError;
use sitereport_core::result::AppResult;
use sitereport_entity::share::ShareSettings;

use super::registry::ShareRegistry;

/// In-memory share registry guarded by a Tokio mutex.
#[derive(Debug, Clone, Default)]
pub struct MemoryShareRegistry {
    /// Share id → record.
    shares: Arc<Mutex<HashMap<Uuid, ShareSettings>>>,
}

impl MemoryShareRegistry {
    /// Creates an empty share registry.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShareRegistry for MemoryShareRegistry {
    async fn insert(&self, share: ShareSettings) -> AppResult<ShareSettings> {
        let mut shares = self.shares.lock().await;
        info!(
            share_id = %share.id,
            report_id = %share.report_id,
            shared_by = %share.shared_by,
            is_public = share.is_public,
            "Share created"
        );
        shares.insert(share.id, share.clone());
        Ok(share)
    }

    async fn get(&self, share_id: Uuid) -> AppResult<ShareSettings> {
        let mut shares = self.shares.lock().await;
        let now = Utc::now();

        let share = shares
            .get(&share_id)
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        if share.is_expired(now) {
            shares.remove(&share_id);
            return Err(AppError::expired("Share has expired"));
        }

        Ok(share.clone())
    }

    async fn find_by_token(&self, token: &str) -> AppResult<ShareSettings> {
        let mut shares = self.shares.lock().await;
        let now = Utc::now();

        let matched = shares
            .values()
            .find(|share| share.is_public && share.share_token.as_deref() == Some(token))
            .cloned();

        let share = matched.ok_or_else(|| AppError::not_found("Invalid share link"))?;

        if share.is_expired(now) {
            shares.remove(&share.id);
            return Err(AppError::expired("Share link has expired"));
        }

        Ok(share)
    }

    async fn list_for_report(&self, report_id: Uuid) -> AppResult<Vec<ShareSettings>> {
        let mut shares = self.shares.lock().await;
        let now = Utc::now();

        let dead: Vec<Uuid> = shares
            .iter()
            .filter(|(_, share)| share.is_expired(now))
            .map(|(id, _)| *id)
            .collect();
        for id in &dead {
            shares.remove(id);
        }
        if !dead.is_empty() {
            info!(evicted = dead.len(), "Evicted expired shares");
        }

        let mut live: Vec<ShareSettings> = shares
            .values()
            .filter(|share| share.report_id == report_id)
            .cloned()
            .collect();
        live.sort_by_key(|share| share.created_at);

        Ok(live)
    }

    async fn update(&self, share: ShareSettings) -> AppResult<ShareSettings> {
        let mut shares = self.shares.lock().await;

        if !shares.contains_key(&share.id) {
            return Err(AppError::not_found("Share not found"));
        }

        info!(share_id = %share.id, "Share updated");
        shares.insert(share.id, share.clone());
        Ok(share)
    }

    async fn remove(&self, share_id: Uuid) -> AppResult<()> {
        let mut shares = self.shares.lock().await;

        shares
            .remove(&share_id)
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        info!(share_id = %share_id, "Share deleted");
        Ok(())
    }
}
