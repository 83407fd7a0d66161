//! Share registry trait.

use async_trait::async_trait;
use uuid::Uuid;

use sitereport_core::result::AppResult;
use sitereport_entity::share::ShareSettings;

/// Trait for the report-share store.
///
/// Like the lock registry, this owns record lifecycle only — who may
/// create, read, or mutate a share is decided in the service layer.
/// Expiry is lazy: every method treats a share past its deadline as inert
/// and evicts it on touch.
#[async_trait]
pub trait ShareRegistry: Send + Sync + 'static {
    /// Store a fully-validated share record.
    async fn insert(&self, share: ShareSettings) -> AppResult<ShareSettings>;

    /// Fetch a live share by id; `Expired` (with eviction) if past its
    /// deadline, `NotFound` otherwise.
    async fn get(&self, share_id: Uuid) -> AppResult<ShareSettings>;

    /// Token access path: a live, public share with this exact token.
    ///
    /// The token alone is the credential — no user identity is involved.
    async fn find_by_token(&self, token: &str) -> AppResult<ShareSettings>;

    /// List live shares for a report, evicting expired shares encountered
    /// during the scan. Visibility filtering is the caller's job.
    async fn list_for_report(&self, report_id: Uuid) -> AppResult<Vec<ShareSettings>>;

    /// Replace an existing share record.
    async fn update(&self, share: ShareSettings) -> AppResult<ShareSettings>;

    /// Delete a share record.
    async fn remove(&self, share_id: Uuid) -> AppResult<()>;
}
