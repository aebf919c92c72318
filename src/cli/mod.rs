//! Administrative commands shared by the `campusdesk-cli` binary.

use anyhow::anyhow;
use sqlx::PgPool;

use campusdesk_core::{AppError, hash_password};
use campusdesk_models::{NewUser, User};

use crate::authz::PermissionModel;
use crate::store::{PgUserStore, UserStore};

/// Creates an account holding `role` (normally the super-role).
pub async fn create_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> Result<User, AppError> {
    if password.len() < 8 {
        return Err(AppError::validation(anyhow!(
            "Password must be at least 8 characters"
        )));
    }

    let password_hash = hash_password(password)?;

    PgUserStore::new(db.clone())
        .create(NewUser {
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            password_hash,
            role: role.to_string(),
        })
        .await
}

/// One line per grant, sorted, as `module / submodule : action`.
pub fn format_grants(model: &PermissionModel, role: &str) -> Vec<String> {
    let mut lines: Vec<String> = model
        .grants(role)
        .iter()
        .map(|grant| format!("{} / {} : {}", grant.module, grant.submodule, grant.action))
        .collect();
    lines.sort();
    lines
}
