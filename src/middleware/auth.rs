use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use campusdesk_auth::{Principal, verify_token};
use campusdesk_core::AppError;

use crate::state::AppState;

/// Resolves the bearer token into a [`Principal`].
///
/// `is_super_role` is fixed here from the permission model.
pub fn resolve_principal(parts: &Parts, state: &AppState) -> Result<Principal, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized(anyhow!("Missing authorization header")))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid authorization header format")))?;

    let claims = verify_token(token, &state.jwt_config)?;

    Principal::from_claims(&claims, |role| state.permissions.is_super_role(role))
}

/// Extractor for the authenticated principal.
///
/// Reuses a principal already resolved by a guard on the same request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn user_id(&self) -> i64 {
        self.0.user_id
    }

    pub fn role(&self) -> &str {
        &self.0.role_id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(AuthUser(principal.clone()));
        }

        let principal = resolve_principal(parts, state)?;
        parts.extensions.insert(principal.clone());

        Ok(AuthUser(principal))
    }
}

/// Rejects requests without a valid principal. No permission requirement.
pub async fn require_authenticated(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    AuthUser::from_request_parts(&mut parts, &state).await?;

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}
