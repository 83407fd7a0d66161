//! Integration tests for user-permissions management endpoints.

mod helpers;

use http::StatusCode;
use sitereport_entity::Role;
use uuid::Uuid;

#[tokio::test]
async fn test_admin_creates_user_with_role_derived_permissions() {
    let app = helpers::TestApp::new().await;
    let admin = app.create_test_user("Admin", Role::Admin).await;
    let new_user = Uuid::new_v4();

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{new_user}?user_id={admin}"),
            Some(serde_json::json!({
                "user_name": "Tanaka",
                "role": "engineer",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let data = response.data();
    assert_eq!(data["role"], "engineer");
    let permissions = data["permissions"].as_array().unwrap();
    assert!(permissions.contains(&serde_json::json!("lock_pages")));
    assert!(!permissions.contains(&serde_json::json!("unlock_pages")));
}

#[tokio::test]
async fn test_non_admin_cannot_manage_users() {
    let app = helpers::TestApp::new().await;
    let manager = app.create_test_user("Yamada", Role::Manager).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{}?user_id={manager}", Uuid::new_v4()),
            Some(serde_json::json!({
                "user_name": "Mori",
                "role": "viewer",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_self_lookup_is_allowed_others_are_not() {
    let app = helpers::TestApp::new().await;
    let viewer = app.create_test_user("Mori", Role::Viewer).await;
    let other = app.create_test_user("Kato", Role::Viewer).await;

    let own = app
        .request("GET", &format!("/api/users/{viewer}?user_id={viewer}"), None)
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.data()["user_name"], "Mori");

    let denied = app
        .request("GET", &format!("/api/users/{other}?user_id={viewer}"), None)
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_users_requires_admin() {
    let app = helpers::TestApp::new().await;
    let admin = app.create_test_user("Admin", Role::Admin).await;
    app.create_test_user("Tanaka", Role::Engineer).await;

    let listed = app
        .request("GET", &format!("/api/users?user_id={admin}"), None)
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.data().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = helpers::TestApp::new().await;
    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
}
