use std::sync::Arc;

use campusdesk_config::{AuthzConfig, CorsConfig, JwtConfig};
use campusdesk_core::AppError;
use sqlx::PgPool;

use crate::authz::{AuthorizationGate, PermissionModel};
use crate::store::{PgRecordStore, PgUserStore, RecordStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub users: Arc<dyn UserStore>,
    pub permissions: Arc<PermissionModel>,
    pub gate: AuthorizationGate,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub authz_config: AuthzConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        users: Arc<dyn UserStore>,
        permissions: PermissionModel,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        authz_config: AuthzConfig,
    ) -> Self {
        let permissions = Arc::new(permissions);
        Self {
            store,
            users,
            gate: AuthorizationGate::new(permissions.clone()),
            permissions,
            jwt_config,
            cors_config,
            authz_config,
        }
    }

    /// State backed by in-memory stores.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn in_memory(permissions: PermissionModel, jwt_config: JwtConfig) -> Self {
        use crate::store::{MemoryRecordStore, MemoryUserStore};

        let authz_config = AuthzConfig {
            super_role: permissions.super_role().to_string(),
            ..AuthzConfig::default()
        };

        Self::new(
            Arc::new(MemoryRecordStore::new()),
            Arc::new(MemoryUserStore::new()),
            permissions,
            jwt_config,
            CorsConfig {
                allowed_origins: Vec::new(),
            },
            authz_config,
        )
    }
}

/// Builds the Postgres-backed state and loads the permission model once.
pub async fn init_app_state(db: PgPool) -> Result<AppState, AppError> {
    let authz_config = AuthzConfig::from_env();
    let permissions = PermissionModel::load(&db, &authz_config.super_role).await?;

    Ok(AppState::new(
        Arc::new(PgRecordStore::new(db.clone())),
        Arc::new(PgUserStore::new(db)),
        permissions,
        JwtConfig::from_env(),
        CorsConfig::from_env(),
        authz_config,
    ))
}
