pub mod beers;
pub mod customers;

use axum::{extract::State, routing::get, Json, Router};
use common::types::{Health, StoreCounts};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::{errors::JsonApiError, openapi::ApiDoc, state::AppState};

#[derive(Serialize)]
pub struct HealthReport {
    #[serde(flatten)]
    pub health: Health,
    #[serde(flatten)]
    pub counts: StoreCounts,
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses(
        (status = 200, description = "Service is up", body = crate::openapi::HealthResponse),
        (status = 503, description = "Store Unavailable", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthReport>, JsonApiError> {
    let counts = StoreCounts {
        beers: state.beers.count().await?,
        customers: state.customers.count().await?,
    };
    Ok(Json(HealthReport { health: Health { status: "ok" }, counts }))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router: health, OpenAPI, beer and customer resources.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let beer_routes = Router::new()
        .route(beers::BEER_PATH, get(beers::list).post(beers::create))
        .route(beers::BEER_SEARCH_PATH, get(beers::search))
        .route(
            beers::BEER_PATH_ID,
            get(beers::get).put(beers::update).patch(beers::patch).delete(beers::delete),
        );

    let customer_routes = Router::new()
        .route(customers::CUSTOMER_PATH, get(customers::list).post(customers::create))
        .route(customers::CUSTOMER_SEARCH_PATH, get(customers::search))
        .route(
            customers::CUSTOMER_PATH_ID,
            get(customers::get)
                .put(customers::update)
                .patch(customers::patch)
                .delete(customers::delete),
        );

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(beer_routes)
        .merge(customer_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
