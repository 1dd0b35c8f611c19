//! Web API Authentication Tests
//!
//! Integration tests for login, registration, logout and session checks.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{
    create_test_server, login, post_empty, post_json, raw_session_cookie, register,
    session_cookie,
};

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_success_sets_cookie() {
    let server = create_test_server().await;

    let response = register(&server, "Test User", "test@example.com", "password123").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["id"].as_i64().unwrap() > 0);

    let cookie = raw_session_cookie(&response).expect("session cookie");
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Expires="));
}

#[tokio::test]
async fn test_register_then_login_same_id() {
    let server = create_test_server().await;

    let registered: Value = register(&server, "Alice", "alice@example.com", "x")
        .await
        .json();
    let response = login(&server, "alice@example.com", "x").await;

    response.assert_status_ok();
    let logged_in: Value = response.json();
    assert_eq!(registered["id"], logged_in["id"]);
}

#[tokio::test]
async fn test_register_with_image_path() {
    let server = create_test_server().await;

    let response = post_json(
        &server,
        "/api/v1/auth/register",
        &json!({
            "name": "Pic",
            "email": "pic@example.com",
            "password": "pw",
            "imagePath": "/images/pic.png"
        }),
        None,
    )
    .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = create_test_server().await;

    register(&server, "First", "dup@example.com", "password123")
        .await
        .assert_status_ok();
    let response = register(&server, "Second", "dup@example.com", "password456").await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert!(body["err"].is_string());
}

#[tokio::test]
async fn test_register_malformed_email() {
    let server = create_test_server().await;

    let response = register(&server, "Bad", "not-an-email", "password123").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(session_cookie(&response).is_none());
}

#[tokio::test]
async fn test_register_empty_password() {
    let server = create_test_server().await;

    let response = register(&server, "Empty", "empty@example.com", "").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_malformed_json() {
    let server = create_test_server().await;

    let response = post_json(
        &server,
        "/api/v1/auth/register",
        &json!({ "email": 42 }),
        None,
    )
    .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["err"].is_string());
}

#[tokio::test]
async fn test_register_while_authenticated() {
    let server = create_test_server().await;
    let response = register(&server, "Me", "me@example.com", "pw").await;
    let token = session_cookie(&response).unwrap();

    let response = post_json(
        &server,
        "/api/v1/auth/register",
        &json!({ "name": "Other", "email": "other@example.com", "password": "pw" }),
        Some(&token),
    )
    .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_concurrent_register_one_wins() {
    let server = create_test_server().await;

    let (a, b) = tokio::join!(
        async { register(&server, "A", "race@example.com", "pw").await },
        async { register(&server, "B", "race@example.com", "pw").await },
    );

    let mut statuses = [a.status_code(), b.status_code()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::FORBIDDEN]);
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_wrong_password() {
    let server = create_test_server().await;
    register(&server, "Bob", "bob@example.com", "right")
        .await
        .assert_status_ok();

    let response = login(&server, "bob@example.com", "wrong").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&response).is_none());
}

#[tokio::test]
async fn test_login_unknown_email() {
    let server = create_test_server().await;

    let response = login(&server, "nobody@example.com", "pw").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_malformed_email() {
    let server = create_test_server().await;

    let response = login(&server, "not-an-email", "pw").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_trims_email() {
    let server = create_test_server().await;
    register(&server, "Trim", "trim@example.com", "pw")
        .await
        .assert_status_ok();

    let response = login(&server, "  trim@example.com  ", "pw").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_login_malformed_json() {
    let server = create_test_server().await;

    let response = post_json(
        &server,
        "/api/v1/auth/login",
        &json!({ "email": "a@example.com" }),
        None,
    )
    .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_while_authenticated() {
    let server = create_test_server().await;
    let response = register(&server, "Carl", "carl@example.com", "pw").await;
    let token = session_cookie(&response).unwrap();

    let response = post_json(
        &server,
        "/api/v1/auth/login",
        &json!({ "email": "carl@example.com", "password": "pw" }),
        Some(&token),
    )
    .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_with_stale_cookie_is_allowed() {
    let server = create_test_server().await;
    register(&server, "Dana", "dana@example.com", "pw")
        .await
        .assert_status_ok();

    let response = post_json(
        &server,
        "/api/v1/auth/login",
        &json!({ "email": "dana@example.com", "password": "pw" }),
        Some("stale-token-from-an-old-session"),
    )
    .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_two_logins_distinct_tokens() {
    let server = create_test_server().await;
    register(&server, "Eve", "eve@example.com", "pw")
        .await
        .assert_status_ok();

    let first = session_cookie(&login(&server, "eve@example.com", "pw").await).unwrap();
    let second = session_cookie(&login(&server, "eve@example.com", "pw").await).unwrap();
    assert_ne!(first, second);

    post_empty(&server, "/api/v1/auth/check", Some(&first))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    post_empty(&server, "/api/v1/auth/check", Some(&second))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // Ending one session leaves the other alone
    post_empty(&server, "/api/v1/auth/logout", Some(&first))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    post_empty(&server, "/api/v1/auth/check", Some(&second))
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

// ============================================================================
// Logout / Check Tests
// ============================================================================

#[tokio::test]
async fn test_login_logout_check_flow() {
    let server = create_test_server().await;
    register(&server, "Flow", "flow@example.com", "x")
        .await
        .assert_status_ok();

    let response = login(&server, "flow@example.com", "x").await;
    response.assert_status_ok();
    let token = session_cookie(&response).expect("cookie set on login");
    assert!(!token.is_empty());

    post_empty(&server, "/api/v1/auth/check", Some(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = post_empty(&server, "/api/v1/auth/logout", Some(&token)).await;
    response.assert_status(StatusCode::NO_CONTENT);
    let cleared = raw_session_cookie(&response).expect("cookie cleared on logout");
    assert!(cleared.starts_with("session_token=;"));
    assert!(cleared.contains("Max-Age=0"));

    post_empty(&server, "/api/v1/auth/check", Some(&token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_check_without_cookie() {
    let server = create_test_server().await;

    let response = post_empty(&server, "/api/v1/auth/check", None).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert!(body["err"].is_string());
}

#[tokio::test]
async fn test_check_with_unknown_token() {
    let server = create_test_server().await;

    post_empty(&server, "/api/v1/auth/check", Some("unknown-token"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_cookie() {
    let server = create_test_server().await;

    post_empty(&server, "/api/v1/auth/logout", None)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_twice() {
    let server = create_test_server().await;
    let token = session_cookie(&register(&server, "Twice", "twice@example.com", "pw").await)
        .unwrap();

    post_empty(&server, "/api/v1/auth/logout", Some(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    // The session is gone, so the auth stage answers
    post_empty(&server, "/api/v1/auth/logout", Some(&token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_session_is_live() {
    let server = create_test_server().await;
    let token = session_cookie(&register(&server, "Live", "live@example.com", "pw").await)
        .unwrap();

    post_empty(&server, "/api/v1/auth/check", Some(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);
}
