mod common;

use axum::http::StatusCode;
use campusdesk::authz::PermissionModel;
use campusdesk_core::permissions::{modules, roles};
use campusdesk_core::{Action, PermissionGrant};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_create_school_without_token_is_unauthorized() {
    let app = TestApp::new();
    let (status, body) = app
        .post("/api/schools", None, json!({ "name": "North High" }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_school_with_garbage_token_is_unauthorized() {
    let app = TestApp::new();
    let (status, _) = app
        .post("/api/schools", Some("not-a-jwt"), json!({ "name": "North High" }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_school_without_grant_is_forbidden() {
    let app = TestApp::new();
    let token = app.user_token();
    let (status, _) = app
        .post("/api/schools", Some(&token), json!({ "name": "North High" }))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_school_as_staff() {
    let app = TestApp::new();
    let token = app.staff_token();
    let (status, body) = app
        .post("/api/schools", Some(&token), json!({ "name": "North High" }))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "North High");
    assert!(body["id"].is_i64());
    assert_eq!(body["created_at"], body["updated_at"]);
}

#[tokio::test]
async fn test_create_school_as_super_role_without_grants() {
    let app = TestApp::with_model(PermissionModel::new(roles::ADMIN, Vec::new()));
    let token = app.admin_token();
    let (status, _) = app
        .post("/api/schools", Some(&token), json!({ "name": "North High" }))
        .await;

    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_school_empty_or_missing_name_is_validation_error() {
    let app = TestApp::new();
    let token = app.staff_token();

    let (status, _) = app
        .post("/api/schools", Some(&token), json!({ "name": "" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = app
        .post("/api/schools", Some(&token), json!({ "title": "North High" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "name is required");

    let (status, _) = app
        .post("/api/schools", Some(&token), json!({ "name": 42 }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_schools_requires_authentication_only() {
    let app = TestApp::new();

    let (status, _) = app.get("/api/schools?page=1&per_page=10", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = app.user_token();
    let (status, body) = app
        .get("/api/schools?page=1&per_page=10", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 0);
    assert_eq!(body["meta"]["total_pages"], 0);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_schools_invalid_page_parameters() {
    let app = TestApp::new();
    let token = app.user_token();

    for uri in [
        "/api/schools",
        "/api/schools?page=1",
        "/api/schools?page=0&per_page=10",
        "/api/schools?page=1&per_page=-2",
        "/api/schools?page=one&per_page=10",
    ] {
        let (status, _) = app.get(uri, Some(&token)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_list_schools_paginates_five_records() {
    let app = TestApp::new();
    let token = app.staff_token();
    for name in ["A", "B", "C", "D", "E"] {
        app.post("/api/schools", Some(&token), json!({ "name": name }))
            .await;
    }

    let (_, first) = app
        .get("/api/schools?page=1&per_page=2", Some(&token))
        .await;
    assert_eq!(first["data"].as_array().unwrap().len(), 2);
    assert_eq!(first["meta"]["total"], 5);
    assert_eq!(first["meta"]["total_pages"], 3);
    assert_eq!(first["data"][0]["name"], "A");

    let (_, second) = app
        .get("/api/schools?page=2&per_page=2", Some(&token))
        .await;
    assert_eq!(second["data"][0]["name"], "C");
    assert_eq!(second["data"][1]["name"], "D");

    let (_, third) = app
        .get("/api/schools?page=3&per_page=2", Some(&token))
        .await;
    assert_eq!(third["data"].as_array().unwrap().len(), 1);
    assert_eq!(third["data"][0]["name"], "E");
    assert_eq!(third["meta"]["page"], 3);
    assert_eq!(third["meta"]["per_page"], 2);
}

#[tokio::test]
async fn test_list_schools_filter_by_name() {
    let app = TestApp::new();
    let token = app.staff_token();
    for name in ["North High", "South High", "Northgate Academy"] {
        app.post("/api/schools", Some(&token), json!({ "name": name }))
            .await;
    }

    let (status, body) = app
        .get("/api/schools?page=1&per_page=10&name=north", Some(&token))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 2);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["North High", "Northgate Academy"]);
}

#[tokio::test]
async fn test_update_school() {
    let app = TestApp::new();
    let token = app.staff_token();
    let (_, created) = app
        .post("/api/schools", Some(&token), json!({ "name": "Old Name" }))
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = app
        .patch(
            &format!("/api/schools/{}", id),
            Some(&token),
            json!({ "name": "New Name" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "New Name");
    assert_eq!(updated["created_at"], created["created_at"]);
}

#[tokio::test]
async fn test_update_missing_school_is_not_found() {
    let app = TestApp::new();
    let token = app.staff_token();
    let (status, _) = app
        .patch("/api/schools/999", Some(&token), json!({ "name": "x" }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_school() {
    let app = TestApp::new();
    let token = app.staff_token();
    let (_, created) = app
        .post("/api/schools", Some(&token), json!({ "name": "Short-lived" }))
        .await;
    let uri = format!("/api/schools/{}", created["id"]);

    let (status, _) = app.delete(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.delete(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .patch(&uri, Some(&token), json!({ "name": "Back" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_removing_a_grant_denies_only_that_action() {
    let grants: Vec<PermissionGrant> = common::default_grants()
        .into_iter()
        .filter(|g| !(g.module == modules::SCHOOLS && g.action == Action::Delete))
        .collect();
    let app = TestApp::with_model(PermissionModel::new(roles::ADMIN, grants));
    let token = app.staff_token();

    let (status, created) = app
        .post("/api/schools", Some(&token), json!({ "name": "Kept" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .delete(&format!("/api/schools/{}", created["id"]), Some(&token))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
