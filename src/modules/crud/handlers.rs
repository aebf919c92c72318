use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    Extension, Json,
    extract::{
        Path, Query,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde_json::{Map, Value};

use campusdesk_core::{AppError, PageParams};
use campusdesk_models::PaginatedRecordsResponse;

use crate::validator::body_rejection;

use super::controller::ResourceController;

/// Per-resource handler context, attached to each resource router as an extension.
pub struct ResourceEndpoint {
    pub controller: ResourceController,
    /// Whether listing honors a `?<field>=` filter.
    pub filterable: bool,
}

fn field_value(endpoint: &ResourceEndpoint, body: &Map<String, Value>) -> Result<String, AppError> {
    let field = endpoint.controller.config().field_name;
    match body.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(AppError::validation(anyhow!("{} must be a string", field))),
        None => Err(AppError::validation(anyhow!("{} is required", field))),
    }
}

fn json_body(
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Map<String, Value>, AppError> {
    payload.map(|Json(body)| body).map_err(body_rejection)
}

fn record_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    id.map(|Path(id)| id)
        .map_err(|_| AppError::validation(anyhow!("Record id must be an integer")))
}

#[utoipa::path(
    post,
    path = "/api/{resource}",
    params(
        ("resource" = String, Path, description = "schools, non-working-days, programs, campuses or service-windows")
    ),
    request_body(content = Object, description = "Single text field, e.g. {\"name\": \"North High\"} or {\"day\": \"2024-12-25\"}"),
    responses(
        (status = 201, description = "Record created", body = Object),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - missing permission"),
        (status = 422, description = "Field missing, empty or longer than 255 characters")
    ),
    tag = "Records",
    security(("bearer_auth" = []))
)]
pub async fn create_record(
    Extension(endpoint): Extension<Arc<ResourceEndpoint>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let body = json_body(payload)?;
    let value = field_value(&endpoint, &body)?;

    let record = endpoint.controller.create(&value).await?;
    let field = endpoint.controller.config().field_name;

    Ok((StatusCode::CREATED, Json(record.to_json(field))))
}

#[utoipa::path(
    get,
    path = "/api/{resource}",
    params(
        ("resource" = String, Path, description = "schools, non-working-days, programs, campuses or service-windows"),
        PageParams,
        ("name" = Option<String>, Query, description = "Case-insensitive partial match on the text field, where the resource supports filtering")
    ),
    responses(
        (status = 200, description = "Paginated records", body = PaginatedRecordsResponse),
        (status = 400, description = "Missing or non-positive page parameters"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - missing permission")
    ),
    tag = "Records",
    security((), ("bearer_auth" = []))
)]
pub async fn list_records(
    Extension(endpoint): Extension<Arc<ResourceEndpoint>>,
    params: Result<Query<PageParams>, QueryRejection>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<PaginatedRecordsResponse>, AppError> {
    let Query(params) = params
        .map_err(|e| AppError::invalid_page(anyhow!("Invalid pagination parameters: {}", e)))?;
    let request = params.into_request()?;

    let filter = if endpoint.filterable {
        query.get(endpoint.controller.config().field_name).map(String::as_str)
    } else {
        None
    };

    let page = endpoint
        .controller
        .read(request.page(), request.per_page(), filter)
        .await?;

    Ok(Json(page))
}

#[utoipa::path(
    patch,
    path = "/api/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "schools, programs, campuses or service-windows"),
        ("id" = i64, Path, description = "Record ID")
    ),
    request_body(content = Object, description = "Replacement value for the text field"),
    responses(
        (status = 200, description = "Record updated", body = Object),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - missing permission"),
        (status = 404, description = "Record not found"),
        (status = 422, description = "Field missing, empty or longer than 255 characters")
    ),
    tag = "Records",
    security(("bearer_auth" = []))
)]
pub async fn update_record(
    Extension(endpoint): Extension<Arc<ResourceEndpoint>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let id = record_id(id)?;
    let body = json_body(payload)?;
    let value = field_value(&endpoint, &body)?;

    let record = endpoint.controller.update(id, &value).await?;
    let field = endpoint.controller.config().field_name;

    Ok(Json(record.to_json(field)))
}

#[utoipa::path(
    delete,
    path = "/api/{resource}/{id}",
    params(
        ("resource" = String, Path, description = "schools, non-working-days, programs, campuses or service-windows"),
        ("id" = i64, Path, description = "Record ID")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - missing permission"),
        (status = 404, description = "Record not found")
    ),
    tag = "Records",
    security(("bearer_auth" = []))
)]
pub async fn delete_record(
    Extension(endpoint): Extension<Arc<ResourceEndpoint>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = record_id(id)?;
    endpoint.controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
