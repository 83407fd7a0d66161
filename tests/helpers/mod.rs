//! Shared test helpers for integration tests.

use std::collections::HashSet;
use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use chrono::Utc;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use sitereport_api::state::AppState;
use sitereport_auth::rbac::checker::PermissionChecker;
use sitereport_core::config::AppConfig;
use sitereport_entity::{Role, UserPermissions};
use sitereport_registry::lock::memory::MemoryLockRegistry;
use sitereport_registry::share::memory::MemoryShareRegistry;
use sitereport_registry::share::token::ShareTokenGenerator;
use sitereport_registry::user::directory::UserDirectory;
use sitereport_service::lock::LockService;
use sitereport_service::share::ShareService;
use sitereport_service::user::UserService;

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// User directory for direct seeding.
    pub directory: Arc<UserDirectory>,
    /// RBAC evaluator, for deriving seeded permission sets.
    pub checker: Arc<PermissionChecker>,
}

impl TestApp {
    /// Create a new test application with an in-memory stack.
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a test application with custom settings (e.g. a negative
    /// lease so locks are born expired).
    pub async fn with_config(config: AppConfig) -> Self {
        let checker = Arc::new(PermissionChecker::new());
        let directory = Arc::new(UserDirectory::new());

        let lock_registry = Arc::new(MemoryLockRegistry::new(config.lock.clone()));
        let share_registry = Arc::new(MemoryShareRegistry::new());

        let lock_service = Arc::new(LockService::new(
            Arc::clone(&directory),
            Arc::clone(&checker),
            lock_registry,
            config.lock.clone(),
        ));
        let share_service = Arc::new(ShareService::new(
            Arc::clone(&directory),
            Arc::clone(&checker),
            share_registry,
            ShareTokenGenerator::new(&config.share),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&directory),
            Arc::clone(&checker),
        ));

        let app_state = AppState {
            config: Arc::new(config),
            checker: Arc::clone(&checker),
            directory: Arc::clone(&directory),
            lock_service,
            share_service,
            user_service,
        };

        let router = sitereport_api::build_router(app_state);

        Self {
            router,
            directory,
            checker,
        }
    }

    /// Seed a user record directly and return its ID.
    pub async fn create_test_user(&self, name: &str, role: Role) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.directory
            .upsert(UserPermissions {
                user_id: id,
                user_name: name.to_string(),
                role,
                permissions: self.checker.policies().permissions_for_role(&role),
                project_ids: HashSet::new(),
                construction_ids: HashSet::new(),
                created_at: now,
                updated_at: now,
            })
            .await
            .expect("Failed to seed test user");
        id
    }

    /// Make an HTTP request to the test app.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}

impl TestResponse {
    /// The `data` field of the success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}
