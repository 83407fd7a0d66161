//! In-memory lock registry using a Tokio mutex for single-node deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use sitereport_core::config::lock::LockConfig;
use sitereport_core::error::AppError;
use sitereport_core::result::AppResult;
use sitereport_entity::lock::model::format_remaining;
use sitereport_entity::lock::{LockFilter, LockStatus, PageLock};

use super::registry::{AcquireRequest, LockRegistry};

/// In-memory lock registry guarded by a Tokio mutex.
///
/// The whole map sits behind one mutex, so every read-modify-write
/// sequence (conflict check + insert, expiry check + evict) is a single
/// critical section. Suitable for single-node deployments only: lock
/// semantics are meaningless if two processes each think they are
/// authoritative.
#[derive(Debug, Clone)]
pub struct MemoryLockRegistry {
    /// Lock id → record.
    locks: Arc<Mutex<HashMap<Uuid, PageLock>>>,
    /// Lease settings.
    config: LockConfig,
}

impl MemoryLockRegistry {
    /// Creates an empty lock registry.
    pub fn new(config: LockConfig) -> Self {
        Self {
            locks: Arc::new(Mutex::new(HashMap::new())),
            config,
        }
    }

    /// Builds the conflict error for a page held by another user.
    fn conflict_error(lock: &PageLock, now: chrono::DateTime<chrono::Utc>) -> AppError {
        let remaining = lock.remaining(now);
        AppError::conflict(format!(
            "Page is locked by {} ({} remaining)",
            lock.user_name,
            format_remaining(remaining)
        ))
        .with_details(serde_json::json!({
            "lock_id": lock.id,
            "holder_id": lock.user_id,
            "holder_name": lock.user_name,
            "remaining_seconds": remaining.num_seconds(),
            "remaining": format_remaining(remaining),
            "expires_at": lock.expires_at,
        }))
    }
}

#[async_trait]
impl LockRegistry for MemoryLockRegistry {
    async fn acquire(&self, request: AcquireRequest) -> AppResult<PageLock> {
        let mut locks = self.locks.lock().await;
        let now = Utc::now();

        // Scan for a live lock on this page, evicting dead ones as we go.
        let mut existing_own: Option<Uuid> = None;
        let mut dead: Vec<Uuid> = Vec::new();
        for (id, lock) in locks.iter() {
            if lock.page_id != request.page_id {
                continue;
            }
            if lock.is_expired(now) {
                dead.push(*id);
            } else if lock.user_id == request.user_id {
                existing_own = Some(*id);
            } else {
                return Err(Self::conflict_error(lock, now));
            }
        }
        for id in dead {
            locks.remove(&id);
        }

        let expires_at = now + Duration::minutes(self.config.lease_minutes);

        // Same user re-acquiring their own page: refresh the lease in
        // place rather than inserting a duplicate record.
        if let Some(lock) = existing_own.and_then(|id| locks.get_mut(&id)) {
            lock.expires_at = expires_at;
            if lock.reason.is_none() {
                lock.reason = request.reason;
            }
            info!(
                lock_id = %lock.id,
                page_id = %request.page_id,
                user_id = %request.user_id,
                "Page lock refreshed by holder"
            );
            return Ok(lock.clone());
        }

        let lock = PageLock {
            id: Uuid::new_v4(),
            page_id: request.page_id,
            report_id: request.report_id,
            user_id: request.user_id,
            user_name: request.user_name,
            status: LockStatus::Locked,
            locked_at: now,
            expires_at,
            reason: request.reason,
        };
        locks.insert(lock.id, lock.clone());

        info!(
            lock_id = %lock.id,
            page_id = %lock.page_id,
            report_id = %lock.report_id,
            user_id = %lock.user_id,
            expires_at = %lock.expires_at,
            "Page lock acquired"
        );

        Ok(lock)
    }

    async fn extend(&self, lock_id: Uuid, additional_minutes: Option<i64>) -> AppResult<PageLock> {
        let mut locks = self.locks.lock().await;
        let now = Utc::now();

        let expired = locks
            .get(&lock_id)
            .map(|lock| lock.is_expired(now))
            .ok_or_else(|| AppError::not_found("Lock not found"))?;

        if expired {
            locks.remove(&lock_id);
            warn!(lock_id = %lock_id, "Extend requested on expired lock, evicting");
            return Err(AppError::expired(
                "Lock has already expired; re-acquire the page",
            ));
        }

        let additional = additional_minutes.unwrap_or(self.config.extend_minutes);
        let lock = locks
            .get_mut(&lock_id)
            .ok_or_else(|| AppError::not_found("Lock not found"))?;
        // Additive from the prior deadline, not reset from now, so
        // repeated extensions compound deterministically.
        lock.expires_at += Duration::minutes(additional);

        info!(
            lock_id = %lock_id,
            additional_minutes = additional,
            expires_at = %lock.expires_at,
            "Page lock extended"
        );

        Ok(lock.clone())
    }

    async fn release(&self, lock_id: Uuid) -> AppResult<PageLock> {
        let mut locks = self.locks.lock().await;

        let lock = locks
            .remove(&lock_id)
            .ok_or_else(|| AppError::not_found("Lock not found"))?;

        info!(
            lock_id = %lock_id,
            page_id = %lock.page_id,
            user_id = %lock.user_id,
            "Page lock released"
        );

        Ok(lock)
    }

    async fn get(&self, lock_id: Uuid) -> AppResult<PageLock> {
        let mut locks = self.locks.lock().await;
        let now = Utc::now();

        let lock = locks
            .get(&lock_id)
            .ok_or_else(|| AppError::not_found("Lock not found"))?;

        if lock.is_expired(now) {
            locks.remove(&lock_id);
            return Err(AppError::expired("Lock has expired"));
        }

        Ok(lock.clone())
    }

    async fn list(&self, filter: LockFilter) -> AppResult<Vec<PageLock>> {
        let mut locks = self.locks.lock().await;
        let now = Utc::now();

        // Opportunistic GC: there is no background sweeper, so reads are
        // where dead leases get collected.
        let dead: Vec<Uuid> = locks
            .iter()
            .filter(|(_, lock)| lock.is_expired(now))
            .map(|(id, _)| *id)
            .collect();
        for id in &dead {
            locks.remove(id);
        }
        if !dead.is_empty() {
            info!(evicted = dead.len(), "Evicted expired page locks");
        }

        let mut live: Vec<PageLock> = locks
            .values()
            .filter(|lock| filter.matches(lock))
            .cloned()
            .collect();
        live.sort_by_key(|lock| lock.locked_at);

        Ok(live)
    }
}
