use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use futures_util::TryStreamExt;
use models::CustomerDto;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{errors::JsonApiError, state::AppState};

pub const CUSTOMER_PATH: &str = "/api/v3/customer";
pub const CUSTOMER_PATH_ID: &str = "/api/v3/customer/:customer_id";
pub const CUSTOMER_SEARCH_PATH: &str = "/api/v3/customer/search";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Exact, case-sensitive customer name.
    pub name: String,
}

#[utoipa::path(
    get, path = "/api/v3/customer", tag = "customer",
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::CustomerDoc]),
        (status = 503, description = "Store Unavailable")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CustomerDto>>, JsonApiError> {
    let customers: Vec<CustomerDto> = state.customers.list_all().try_collect().await?;
    info!(count = customers.len(), "list customers");
    Ok(Json(customers))
}

#[utoipa::path(
    post, path = "/api/v3/customer", tag = "customer",
    request_body = crate::openapi::CustomerDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CustomerDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Id supplied but unknown")
    )
)]
pub async fn create(State(state): State<AppState>, Json(input): Json<CustomerDto>) -> Result<impl IntoResponse, JsonApiError> {
    let saved = state.customers.save(input).await?;
    let location = saved.id.map(|id| format!("{CUSTOMER_PATH}/{id}")).unwrap_or_default();
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(saved)))
}

#[utoipa::path(
    get, path = "/api/v3/customer/{customer_id}", tag = "customer",
    params(("customer_id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CustomerDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(customer_id): Path<Uuid>) -> Result<Json<CustomerDto>, JsonApiError> {
    state
        .customers
        .get_by_id(customer_id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("customer {customer_id} not found"))))
}

#[utoipa::path(
    get, path = "/api/v3/customer/search", tag = "customer",
    params(SearchQuery),
    responses(
        (status = 200, description = "First match", body = crate::openapi::CustomerDoc),
        (status = 404, description = "No match")
    )
)]
pub async fn search(State(state): State<AppState>, Query(q): Query<SearchQuery>) -> Result<Json<CustomerDto>, JsonApiError> {
    state
        .customers
        .find_first_by_name(&q.name)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("no customer named {}", q.name))))
}

#[utoipa::path(
    put, path = "/api/v3/customer/{customer_id}", tag = "customer",
    params(("customer_id" = Uuid, Path, description = "Customer id")),
    request_body = crate::openapi::CustomerDoc,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(State(state): State<AppState>, Path(customer_id): Path<Uuid>, Json(input): Json<CustomerDto>) -> Result<StatusCode, JsonApiError> {
    state.customers.update_by_id(customer_id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch, path = "/api/v3/customer/{customer_id}", tag = "customer",
    params(("customer_id" = Uuid, Path, description = "Customer id")),
    request_body = crate::openapi::CustomerDoc,
    responses(
        (status = 204, description = "Patched"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn patch(State(state): State<AppState>, Path(customer_id): Path<Uuid>, Json(input): Json<CustomerDto>) -> Result<StatusCode, JsonApiError> {
    state.customers.patch_by_id(customer_id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/v3/customer/{customer_id}", tag = "customer",
    params(("customer_id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Deleted (also when already absent)"),
        (status = 503, description = "Store Unavailable")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(customer_id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    state.customers.delete_by_id(customer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
