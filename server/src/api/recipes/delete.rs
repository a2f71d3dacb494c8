use axum::response::{IntoResponse, Response};
use axum::Json;

use super::in_store;
use crate::api::{ApiError, ErrorResponse, MessageResponse};
use crate::AppState;

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe deleted successfully", body = MessageResponse),
        (status = 400, description = "Missing or malformed id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(store: AppState, id: String) -> Result<Response, ApiError> {
    let lookup_id = id.clone();
    let deleted = in_store(store, move |s| s.delete_by_id(&lookup_id)).await?;
    if deleted == 0 {
        tracing::debug!(%id, "delete matched no recipe");
    }

    Ok(Json(MessageResponse::new("Recipe deleted successfully")).into_response())
}
