use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{change_password, login, signup};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

pub fn init_users_router() -> Router<AppState> {
    Router::new().route("/password", post(change_password))
}
