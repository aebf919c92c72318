mod common;

use axum::http::StatusCode;
use campusdesk_core::permissions::roles;
use common::TestApp;
use serde_json::{Value, json};

async fn signup(app: &TestApp, email: &str, password: &str) -> (StatusCode, Value) {
    app.post(
        "/api/auth/signup",
        None,
        json!({ "name": "Ana Torres", "email": email, "password": password }),
    )
    .await
}

async fn login(app: &TestApp, email: &str, password: &str) -> (StatusCode, Value) {
    app.post(
        "/api/auth/login",
        None,
        json!({ "email": email, "password": password }),
    )
    .await
}

#[tokio::test]
async fn test_signup_assigns_default_role() {
    let app = TestApp::new();
    let (status, body) = signup(&app, "ana@campus.edu", "password123").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "ana@campus.edu");
    assert_eq!(body["role"], roles::USER);
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let app = TestApp::new();
    signup(&app, "ana@campus.edu", "password123").await;
    let (status, _) = signup(&app, "ANA@campus.edu", "password456").await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_validation() {
    let app = TestApp::new();

    let (status, _) = signup(&app, "ana@campus.edu", "short").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = signup(&app, "not-an-email", "password123").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = app
        .post("/api/auth/signup", None, json!({ "email": "ana@campus.edu" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("is required"));
}

#[tokio::test]
async fn test_login_token_authenticates_requests() {
    let app = TestApp::new();
    signup(&app, "ana@campus.edu", "password123").await;

    let (status, body) = login(&app, "ana@campus.edu", "password123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "ana@campus.edu");

    let token = body["access_token"].as_str().unwrap();
    let (status, _) = app
        .post("/api/programs", Some(token), json!({ "name": "Nursing" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Signed-up users hold no grants.
    let (status, _) = app
        .post("/api/schools", Some(token), json!({ "name": "North High" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_bad_credentials() {
    let app = TestApp::new();
    signup(&app, "ana@campus.edu", "password123").await;

    let (status, _) = login(&app, "ana@campus.edu", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = login(&app, "nobody@campus.edu", "password123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new();
    signup(&app, "ana@campus.edu", "password123").await;
    let (_, body) = login(&app, "ana@campus.edu", "password123").await;
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, _) = app
        .post(
            "/api/users/password",
            None,
            json!({ "current_password": "password123", "new_password": "brand-new-pass" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post(
            "/api/users/password",
            Some(&token),
            json!({ "current_password": "not-my-password", "new_password": "brand-new-pass" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .post(
            "/api/users/password",
            Some(&token),
            json!({ "current_password": "password123", "new_password": "brand-new-pass" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _) = login(&app, "ana@campus.edu", "password123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = login(&app, "ana@campus.edu", "brand-new-pass").await;
    assert_eq!(status, StatusCode::OK);
}
