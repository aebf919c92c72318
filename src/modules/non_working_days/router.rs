use axum::Router;

use campusdesk_core::permissions::{PermissionRequirement, roles};
use campusdesk_models::ResourceConfig;

use crate::modules::crud::{Access, ResourceRoutes};
use crate::state::AppState;

const ADMIN_ONLY: PermissionRequirement = PermissionRequirement::exact_role(roles::ADMIN);

/// Admin-only calendar of days without service. No update route; no filter.
pub fn init_non_working_days_router(state: &AppState) -> Router<AppState> {
    ResourceRoutes::new(ResourceConfig::NON_WORKING_DAYS)
        .create(Access::Require(ADMIN_ONLY))
        .list(Access::Require(ADMIN_ONLY))
        .delete(Access::Require(ADMIN_ONLY))
        .into_router(state)
}
