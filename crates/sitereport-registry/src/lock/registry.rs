//! Lock registry trait.

use async_trait::async_trait;
use uuid::Uuid;

use sitereport_core::result::AppResult;
use sitereport_entity::lock::{LockFilter, PageLock};

/// Parameters for acquiring a page lock.
///
/// Authorization has already happened by the time a registry sees this;
/// the registry only resolves conflicts and manages the lease.
#[derive(Debug, Clone)]
pub struct AcquireRequest {
    /// The page to lock.
    pub page_id: Uuid,
    /// The report the page belongs to.
    pub report_id: Uuid,
    /// The requesting user.
    pub user_id: Uuid,
    /// Display name of the requester, kept for conflict messages.
    pub user_name: String,
    /// Optional free-text reason.
    pub reason: Option<String>,
}

/// Trait for the page-lock store.
///
/// Implementations must make `acquire` atomic with respect to concurrent
/// acquires on the same page: the conflict check and the insert are one
/// critical section, so two racing requests can never both create a live
/// lock on one page. Expiry is lazy — every method treats a lock whose
/// deadline has passed as absent and evicts it on touch.
#[async_trait]
pub trait LockRegistry: Send + Sync + 'static {
    /// Acquire a lock on a page, or fail with a conflict carrying the
    /// existing holder and remaining lease time.
    ///
    /// Re-acquiring a page already held by the same user refreshes the
    /// lease and returns the existing lock.
    async fn acquire(&self, request: AcquireRequest) -> AppResult<PageLock>;

    /// Push the lease deadline forward by `additional_minutes` (the
    /// configured default when `None`), additive from the prior deadline.
    ///
    /// Fails with `Expired` — evicting the record — if the lease already
    /// ran out; the caller must re-acquire.
    async fn extend(&self, lock_id: Uuid, additional_minutes: Option<i64>) -> AppResult<PageLock>;

    /// Delete the lock unconditionally, returning the removed record.
    async fn release(&self, lock_id: Uuid) -> AppResult<PageLock>;

    /// Fetch a live lock by id; `Expired` (with eviction) if its lease
    /// ran out, `NotFound` if it never existed or was already evicted.
    async fn get(&self, lock_id: Uuid) -> AppResult<PageLock>;

    /// List live locks matching the filter, evicting any expired locks
    /// encountered during the scan.
    async fn list(&self, filter: LockFilter) -> AppResult<Vec<PageLock>>;
}
