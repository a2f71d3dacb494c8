use axum::response::{IntoResponse, Response};
use axum::Json;

use super::in_store;
use crate::api::{ApiError, ErrorResponse};
use crate::models::Recipe;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = Recipe),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_recipe(store: AppState, id: String) -> Result<Response, ApiError> {
    match in_store(store, move |s| s.find_by_id(&id)).await {
        Ok(Some(recipe)) => Ok(Json(recipe).into_response()),
        // An id that cannot parse cannot exist either
        Ok(None) | Err(ApiError::InvalidArgument(_)) => Err(ApiError::NotFound),
        Err(e) => Err(e),
    }
}
