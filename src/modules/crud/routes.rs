//! Per-resource route tables.
//!
//! Each resource declares, per operation, whether the route is exposed and
//! what it demands of the caller. Requirements are `const` values fixed
//! here at wiring time.

use std::sync::Arc;

use axum::{
    Extension, Router, middleware,
    routing::{MethodRouter, delete, get, patch, post},
};

use campusdesk_core::PermissionRequirement;
use campusdesk_models::ResourceConfig;

use crate::middleware::auth::require_authenticated;
use crate::middleware::permission::{RouteGuard, require_permission};
use crate::state::AppState;

use super::controller::ResourceController;
use super::handlers::{ResourceEndpoint, create_record, delete_record, list_records, update_record};

/// What a route demands before its handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Require(PermissionRequirement),
}

#[derive(Debug, Clone, Copy)]
pub struct ResourceRoutes {
    config: ResourceConfig,
    create: Option<Access>,
    list: Option<Access>,
    update: Option<Access>,
    delete: Option<Access>,
    filterable: bool,
}

impl ResourceRoutes {
    /// No operation exposed until declared.
    pub fn new(config: ResourceConfig) -> Self {
        Self {
            config,
            create: None,
            list: None,
            update: None,
            delete: None,
            filterable: false,
        }
    }

    pub fn create(mut self, access: Access) -> Self {
        self.create = Some(access);
        self
    }

    pub fn list(mut self, access: Access) -> Self {
        self.list = Some(access);
        self
    }

    pub fn update(mut self, access: Access) -> Self {
        self.update = Some(access);
        self
    }

    pub fn delete(mut self, access: Access) -> Self {
        self.delete = Some(access);
        self
    }

    /// Listing honors `?<field>=` as a partial-match filter.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn into_router(self, state: &AppState) -> Router<AppState> {
        let endpoint = Arc::new(ResourceEndpoint {
            controller: ResourceController::new(self.config, state.store.clone()),
            filterable: self.filterable,
        });

        let mut router = Router::new();
        if let Some(access) = self.create {
            router = router.route("/", guard(post(create_record), access, state));
        }
        if let Some(access) = self.list {
            router = router.route("/", guard(get(list_records), access, state));
        }
        if let Some(access) = self.update {
            router = router.route("/{id}", guard(patch(update_record), access, state));
        }
        if let Some(access) = self.delete {
            router = router.route("/{id}", guard(delete(delete_record), access, state));
        }

        router.layer(Extension(endpoint))
    }
}

fn guard(
    route: MethodRouter<AppState>,
    access: Access,
    state: &AppState,
) -> MethodRouter<AppState> {
    match access {
        Access::Public => route,
        Access::Authenticated => route.route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_authenticated,
        )),
        Access::Require(requirement) => route.route_layer(middleware::from_fn_with_state(
            RouteGuard::new(state.clone(), requirement),
            require_permission,
        )),
    }
}
