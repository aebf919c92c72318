use axum::Router;

use campusdesk_core::permissions::{Action, PermissionRequirement, modules};
use campusdesk_models::ResourceConfig;

use crate::modules::crud::{Access, ResourceRoutes};
use crate::state::AppState;

const CREATE_SCHOOL: PermissionRequirement =
    PermissionRequirement::granular(modules::SCHOOLS, modules::SCHOOL_DIRECTORY, Action::Create);
const UPDATE_SCHOOL: PermissionRequirement =
    PermissionRequirement::granular(modules::SCHOOLS, modules::SCHOOL_DIRECTORY, Action::Update);
const DELETE_SCHOOL: PermissionRequirement =
    PermissionRequirement::granular(modules::SCHOOLS, modules::SCHOOL_DIRECTORY, Action::Delete);

pub fn init_schools_router(state: &AppState) -> Router<AppState> {
    ResourceRoutes::new(ResourceConfig::SCHOOLS)
        .create(Access::Require(CREATE_SCHOOL))
        .list(Access::Authenticated)
        .update(Access::Require(UPDATE_SCHOOL))
        .delete(Access::Require(DELETE_SCHOOL))
        .filterable()
        .into_router(state)
}
