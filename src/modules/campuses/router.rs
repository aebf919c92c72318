use axum::Router;

use campusdesk_models::ResourceConfig;

use crate::modules::crud::{Access, ResourceRoutes};
use crate::state::AppState;

pub fn init_campuses_router(state: &AppState) -> Router<AppState> {
    ResourceRoutes::new(ResourceConfig::CAMPUSES)
        .create(Access::Authenticated)
        .list(Access::Public)
        .update(Access::Authenticated)
        .delete(Access::Authenticated)
        .filterable()
        .into_router(state)
}
