//! Route guards backed by the authorization gate.
//!
//! ```rust,ignore
//! use axum::{middleware, routing::post};
//! use campusdesk_core::{Action, PermissionRequirement, permissions::modules};
//!
//! const CREATE_SCHOOL: PermissionRequirement = PermissionRequirement::granular(
//!     modules::SCHOOLS,
//!     modules::SCHOOL_DIRECTORY,
//!     Action::Create,
//! );
//!
//! let route = post(handler).route_layer(middleware::from_fn_with_state(
//!     RouteGuard::new(state.clone(), CREATE_SCHOOL),
//!     require_permission,
//! ));
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};

use campusdesk_core::{AppError, PermissionRequirement};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Middleware state: the app state plus the requirement of one route.
#[derive(Clone)]
pub struct RouteGuard {
    state: AppState,
    requirement: PermissionRequirement,
}

impl RouteGuard {
    pub fn new(state: AppState, requirement: PermissionRequirement) -> Self {
        Self { state, requirement }
    }
}

/// Resolves the principal (401 when absent or invalid), then asks the gate
/// (403 on deny).
pub async fn require_permission(
    State(guard): State<RouteGuard>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthUser(principal) = AuthUser::from_request_parts(&mut parts, &guard.state).await?;
    guard.state.gate.check(&principal, &guard.requirement)?;

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}
