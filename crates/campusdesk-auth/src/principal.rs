//! The authenticated identity attached to a request.

use anyhow::anyhow;
use campusdesk_core::AppError;

use crate::claims::Claims;

/// Authenticated principal.
///
/// Produced once per request by the principal resolver and immutable for the
/// rest of the request. `is_super_role` is fixed at resolution time from the
/// permission model's notion of the reserved administrative role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub role_id: String,
    pub is_super_role: bool,
}

impl Principal {
    pub fn new(user_id: i64, role_id: impl Into<String>, is_super_role: bool) -> Self {
        Self {
            user_id,
            role_id: role_id.into(),
            is_super_role,
        }
    }

    /// Builds a principal from verified claims.
    ///
    /// `is_super_role` decides whether the claimed role is the reserved one.
    pub fn from_claims(
        claims: &Claims,
        is_super_role: impl Fn(&str) -> bool,
    ) -> Result<Self, AppError> {
        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::unauthorized(anyhow!("Invalid user ID in token")))?;

        Ok(Self::new(
            user_id,
            claims.role.clone(),
            is_super_role(&claims.role),
        ))
    }
}
