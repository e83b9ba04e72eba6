use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use futures_util::TryStreamExt;
use models::BeerDto;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{errors::JsonApiError, state::AppState};

pub const BEER_PATH: &str = "/api/v3/beer";
pub const BEER_PATH_ID: &str = "/api/v3/beer/:beer_id";
pub const BEER_SEARCH_PATH: &str = "/api/v3/beer/search";

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Exact style match.
    pub beer_style: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Exact, case-sensitive beer name.
    pub name: String,
}

#[utoipa::path(
    get, path = "/api/v3/beer", tag = "beer",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::BeerDoc]),
        (status = 503, description = "Store Unavailable")
    )
)]
pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<BeerDto>>, JsonApiError> {
    let beers: Vec<BeerDto> = match q.beer_style {
        Some(style) => state.beers.find_by_style(style).try_collect().await?,
        None => state.beers.list_all().try_collect().await?,
    };
    info!(count = beers.len(), "list beers");
    Ok(Json(beers))
}

#[utoipa::path(
    post, path = "/api/v3/beer", tag = "beer",
    request_body = crate::openapi::BeerDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::BeerDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Id supplied but unknown")
    )
)]
pub async fn create(State(state): State<AppState>, Json(input): Json<BeerDto>) -> Result<impl IntoResponse, JsonApiError> {
    let saved = state.beers.save(input).await?;
    let location = saved.id.map(|id| format!("{BEER_PATH}/{id}")).unwrap_or_default();
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(saved)))
}

#[utoipa::path(
    get, path = "/api/v3/beer/{beer_id}", tag = "beer",
    params(("beer_id" = Uuid, Path, description = "Beer id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::BeerDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(beer_id): Path<Uuid>) -> Result<Json<BeerDto>, JsonApiError> {
    match state.beers.get_by_id(beer_id).await? {
        Some(beer) => Ok(Json(beer)),
        None => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("beer {beer_id} not found")))),
    }
}

#[utoipa::path(
    get, path = "/api/v3/beer/search", tag = "beer",
    params(SearchQuery),
    responses(
        (status = 200, description = "First match", body = crate::openapi::BeerDoc),
        (status = 404, description = "No match")
    )
)]
pub async fn search(State(state): State<AppState>, Query(q): Query<SearchQuery>) -> Result<Json<BeerDto>, JsonApiError> {
    match state.beers.find_first_by_name(&q.name).await? {
        Some(beer) => Ok(Json(beer)),
        None => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("no beer named {}", q.name)))),
    }
}

#[utoipa::path(
    put, path = "/api/v3/beer/{beer_id}", tag = "beer",
    params(("beer_id" = Uuid, Path, description = "Beer id")),
    request_body = crate::openapi::BeerDoc,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(State(state): State<AppState>, Path(beer_id): Path<Uuid>, Json(input): Json<BeerDto>) -> Result<StatusCode, JsonApiError> {
    state.beers.update_by_id(beer_id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch, path = "/api/v3/beer/{beer_id}", tag = "beer",
    params(("beer_id" = Uuid, Path, description = "Beer id")),
    request_body = crate::openapi::BeerDoc,
    responses(
        (status = 204, description = "Patched"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn patch(State(state): State<AppState>, Path(beer_id): Path<Uuid>, Json(input): Json<BeerDto>) -> Result<StatusCode, JsonApiError> {
    state.beers.patch_by_id(beer_id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/api/v3/beer/{beer_id}", tag = "beer",
    params(("beer_id" = Uuid, Path, description = "Beer id")),
    responses(
        (status = 204, description = "Deleted (also when already absent)"),
        (status = 503, description = "Store Unavailable")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(beer_id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    state.beers.delete_by_id(beer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
