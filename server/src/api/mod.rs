pub mod error;
pub mod recipes;

pub use error::ApiError;

use axum::Json;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Confirmation body for mutations
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Recipebox", description = "CRUD API over a recipe collection"),
        components(schemas(ErrorResponse, MessageResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();
    spec.merge(recipes::ApiDoc::openapi());
    spec
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi())
}

/// Fallback for paths outside the recipe prefix.
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
