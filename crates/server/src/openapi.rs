use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub beers: u64,
    pub customers: u64,
}

/// Wire shape of a beer. Timestamps are RFC 3339 and set by the server.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeerDoc {
    pub id: Option<Uuid>,
    #[schema(example = "Galaxy Cat", min_length = 3, max_length = 255)]
    pub beer_name: String,
    #[schema(example = "Pale Ale", max_length = 255)]
    pub beer_style: String,
    #[schema(example = "12356", max_length = 25)]
    pub upc: String,
    #[schema(example = 12.99)]
    pub price: Option<f64>,
    #[schema(example = 122)]
    pub quantity_on_hand: Option<i32>,
    pub created_date: Option<String>,
    pub last_modified_date: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDoc {
    pub id: Option<Uuid>,
    #[schema(example = "Maria", min_length = 3, max_length = 255)]
    pub customer_name: String,
    pub created_date: Option<String>,
    pub last_modified_date: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    pub detail: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::beers::list,
        crate::routes::beers::create,
        crate::routes::beers::get,
        crate::routes::beers::search,
        crate::routes::beers::update,
        crate::routes::beers::patch,
        crate::routes::beers::delete,
        crate::routes::customers::list,
        crate::routes::customers::create,
        crate::routes::customers::get,
        crate::routes::customers::search,
        crate::routes::customers::update,
        crate::routes::customers::patch,
        crate::routes::customers::delete,
    ),
    components(schemas(HealthResponse, BeerDoc, CustomerDoc, ErrorDoc)),
    tags(
        (name = "health"),
        (name = "beer"),
        (name = "customer"),
    )
)]
pub struct ApiDoc;
