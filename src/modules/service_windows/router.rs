use axum::Router;

use campusdesk_core::permissions::{Action, PermissionRequirement, modules};
use campusdesk_models::ResourceConfig;

use crate::modules::crud::{Access, ResourceRoutes};
use crate::state::AppState;

const fn service_window(action: Action) -> PermissionRequirement {
    PermissionRequirement::granular(
        modules::SERVICE_WINDOWS,
        modules::SERVICE_WINDOW_DIRECTORY,
        action,
    )
}

pub fn init_service_windows_router(state: &AppState) -> Router<AppState> {
    ResourceRoutes::new(ResourceConfig::SERVICE_WINDOWS)
        .create(Access::Require(service_window(Action::Create)))
        .list(Access::Require(service_window(Action::Read)))
        .update(Access::Require(service_window(Action::Update)))
        .delete(Access::Require(service_window(Action::Delete)))
        .filterable()
        .into_router(state)
}
