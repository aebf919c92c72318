#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use campusdesk::authz::PermissionModel;
use campusdesk::router::init_router;
use campusdesk::state::AppState;
use campusdesk_auth::create_access_token;
use campusdesk_config::JwtConfig;
use campusdesk_core::permissions::{modules, roles};
use campusdesk_core::{Action, PermissionGrant};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const ALL_ACTIONS: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

/// Staff with full CRUD on both directories, `Admin` as super-role.
pub fn default_grants() -> Vec<PermissionGrant> {
    let mut grants = Vec::new();
    for (module, submodule) in [
        (modules::SCHOOLS, modules::SCHOOL_DIRECTORY),
        (modules::SERVICE_WINDOWS, modules::SERVICE_WINDOW_DIRECTORY),
    ] {
        for action in ALL_ACTIONS {
            grants.push(PermissionGrant::new(roles::STAFF, module, submodule, action));
        }
    }
    grants
}

pub struct TestApp {
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_model(PermissionModel::new(roles::ADMIN, default_grants()))
    }

    pub fn with_model(model: PermissionModel) -> Self {
        Self {
            state: AppState::in_memory(model, jwt_config()),
        }
    }

    pub fn router(&self) -> Router {
        init_router(self.state.clone(), None)
    }

    pub fn token(&self, user_id: i64, role: &str) -> String {
        create_access_token(user_id, "user@campus.edu", role, &self.state.jwt_config).unwrap()
    }

    pub fn admin_token(&self) -> String {
        self.token(1, roles::ADMIN)
    }

    pub fn staff_token(&self) -> String {
        self.token(2, roles::STAFF)
    }

    pub fn user_token(&self) -> String {
        self.token(3, roles::USER)
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send("GET", uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("PATCH", uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send("DELETE", uri, token, None).await
    }
}
