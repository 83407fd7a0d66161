//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sitereport_auth::rbac::checker::PermissionChecker;
use sitereport_core::config::AppConfig;
use sitereport_registry::user::directory::UserDirectory;
use sitereport_service::lock::LockService;
use sitereport_service::share::ShareService;
use sitereport_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Role-based access control evaluator.
    pub checker: Arc<PermissionChecker>,
    /// User permission records.
    pub directory: Arc<UserDirectory>,
    /// Page-lock coordinator.
    pub lock_service: Arc<LockService>,
    /// Report-share coordinator.
    pub share_service: Arc<ShareService>,
    /// User-permissions coordinator.
    pub user_service: Arc<UserService>,
}
