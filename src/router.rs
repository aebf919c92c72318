use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::{metrics_middleware, metrics_routes};
use crate::modules::auth::router::{init_auth_router, init_users_router};
use crate::modules::campuses::router::init_campuses_router;
use crate::modules::non_working_days::router::init_non_working_days_router;
use crate::modules::programs::router::init_programs_router;
use crate::modules::schools::router::init_schools_router;
use crate::modules::service_windows::router::init_service_windows_router;
use crate::state::AppState;

pub fn init_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let api = Router::new()
        .nest("/auth", init_auth_router())
        .nest("/users", init_users_router())
        .nest("/schools", init_schools_router(&state))
        .nest("/non-working-days", init_non_working_days_router(&state))
        .nest("/programs", init_programs_router(&state))
        .nest("/campuses", init_campuses_router(&state))
        .nest("/service-windows", init_service_windows_router(&state));

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/api", api);

    if let Some(handle) = metrics_handle {
        router = router.merge(metrics_routes::<AppState>(handle));
    }

    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    router
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
