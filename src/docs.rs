use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use campusdesk_core::{PageMeta, PageParams};
use campusdesk_models::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, PaginatedRecordsResponse,
    SignupRequest, User,
};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::change_password,
        crate::modules::crud::handlers::create_record,
        crate::modules::crud::handlers::list_records,
        crate::modules::crud::handlers::update_record,
        crate::modules::crud::handlers::delete_record,
    ),
    components(
        schemas(
            User,
            SignupRequest,
            LoginRequest,
            LoginResponse,
            ChangePasswordRequest,
            MessageResponse,
            ErrorResponse,
            PageMeta,
            PageParams,
            PaginatedRecordsResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup and login"),
        (name = "Users", description = "Account maintenance"),
        (name = "Records", description = "Schools, non-working days, programs, campuses and service windows")
    ),
    info(
        title = "CampusDesk API",
        version = "0.1.0",
        description = "Administrative backend for schools, calendars, programs, campuses and service windows, guarded by role permissions.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
