mod common;

use axum::http::StatusCode;
use campusdesk::authz::PermissionModel;
use campusdesk_core::permissions::{modules, roles};
use campusdesk_core::{Action, PermissionGrant};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_listing_requires_read_grant() {
    let app = TestApp::new();
    let uri = "/api/service-windows?page=1&per_page=10";

    let (status, _) = app.get(uri, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user = app.user_token();
    let (status, _) = app.get(uri, Some(&user)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let staff = app.staff_token();
    let (status, _) = app.get(uri, Some(&staff)).await;
    assert_eq!(status, StatusCode::OK);

    let admin = app.admin_token();
    let (status, _) = app.get(uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_staff_crud_flow() {
    let app = TestApp::new();
    let token = app.staff_token();

    let (status, created) = app
        .post(
            "/api/service-windows",
            Some(&token),
            json!({ "name": "Front desk" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let item = format!("/api/service-windows/{}", created["id"]);
    let (status, updated) = app
        .patch(&item, Some(&token), json!({ "name": "Front desk A" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Front desk A");

    let (_, page) = app
        .get(
            "/api/service-windows?page=1&per_page=10&name=desk%20a",
            Some(&token),
        )
        .await;
    assert_eq!(page["meta"]["total"], 1);

    let (status, _) = app.delete(&item, Some(&token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_grant_on_other_submodule_does_not_apply() {
    // Read on the school directory says nothing about service windows.
    let model = PermissionModel::new(
        roles::ADMIN,
        vec![PermissionGrant::new(
            "Clerk",
            modules::SCHOOLS,
            modules::SCHOOL_DIRECTORY,
            Action::Read,
        )],
    );
    let app = TestApp::with_model(model);
    let token = app.token(9, "Clerk");

    let (status, _) = app
        .get("/api/service-windows?page=1&per_page=10", Some(&token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_read_only_role() {
    let model = PermissionModel::new(
        roles::ADMIN,
        vec![PermissionGrant::new(
            "Auditor",
            modules::SERVICE_WINDOWS,
            modules::SERVICE_WINDOW_DIRECTORY,
            Action::Read,
        )],
    );
    let app = TestApp::with_model(model);
    let token = app.token(10, "Auditor");

    let (status, _) = app
        .get("/api/service-windows?page=1&per_page=10", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            "/api/service-windows",
            Some(&token),
            json!({ "name": "Cashier" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
