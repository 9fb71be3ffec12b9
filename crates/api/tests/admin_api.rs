//! HTTP-level integration tests for the admin endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get_auth, make_admin, post_json, put_json_auth, register_user,
};
use sqlx::PgPool;

/// Register an account, flip its admin flag, and log in again so the fresh
/// access token carries the flag.
async fn admin_token(pool: &PgPool) -> String {
    register_user(build_test_app(pool.clone()), "admin@b.com", "Abcdefg1").await;
    make_admin(pool, "admin@b.com").await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "admin@b.com", "password": "Abcdefg1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["sessionToken"].as_str().unwrap().to_string()
}

/// Non-admin identities get 403 (access denied), distinct from the 401 an
/// unauthenticated caller gets.
#[sqlx::test(migrations = "../../migrations")]
async fn test_admin_gate(pool: PgPool) {
    let registered = register_user(build_test_app(pool.clone()), "user@b.com", "Abcdefg1").await;
    let user_token = registered["sessionToken"].as_str().unwrap();

    let response = get_auth(build_test_app(pool.clone()), "/api/v1/admin/users", user_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Access denied");

    let response = common::get(build_test_app(pool), "/api/v1/admin/users").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Admins can list accounts as redacted projections.
#[sqlx::test(migrations = "../../migrations")]
async fn test_admin_list_users(pool: PgPool) {
    let token = admin_token(&pool).await;
    register_user(build_test_app(pool.clone()), "other@b.com", "Abcdefg1").await;

    let response = get_auth(build_test_app(pool), "/api/v1/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let users = json["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("passwordHash").is_none());
        assert!(user.get("password_hash").is_none());
    }
}

/// Suspending an account immediately blocks its logins.
#[sqlx::test(migrations = "../../migrations")]
async fn test_admin_suspend_blocks_login(pool: PgPool) {
    let token = admin_token(&pool).await;
    let target = register_user(build_test_app(pool.clone()), "target@b.com", "Abcdefg1").await;
    let target_id = target["user"]["id"].as_str().unwrap();

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/users/{target_id}/status"),
        &token,
        serde_json::json!({ "status": "suspended" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "target@b.com", "password": "Abcdefg1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Reactivation restores access.
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/users/{target_id}/status"),
        &token,
        serde_json::json!({ "status": "active" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        build_test_app(pool),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "target@b.com", "password": "Abcdefg1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Bad status values are 400, unknown ids are 404.
#[sqlx::test(migrations = "../../migrations")]
async fn test_admin_update_status_validation(pool: PgPool) {
    let token = admin_token(&pool).await;

    let target = register_user(build_test_app(pool.clone()), "v@b.com", "Abcdefg1").await;
    let target_id = target["user"]["id"].as_str().unwrap();

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/admin/users/{target_id}/status"),
        &token,
        serde_json::json!({ "status": "banned" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let missing = uuid::Uuid::new_v4();
    let response = put_json_auth(
        build_test_app(pool),
        &format!("/api/v1/admin/users/{missing}/status"),
        &token,
        serde_json::json!({ "status": "suspended" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
