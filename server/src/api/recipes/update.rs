use axum::body::Bytes;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::in_store;
use crate::api::{ApiError, ErrorResponse, MessageResponse};
use crate::models::RecipeChanges;
use crate::AppState;

/// Merges the body into an existing recipe. An unknown id still answers 200
/// and creates nothing.
#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    request_body = RecipeChanges,
    responses(
        (status = 200, description = "Recipe updated successfully", body = MessageResponse),
        (status = 400, description = "Missing or malformed id, or malformed payload", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn update_recipe(store: AppState, id: String, body: Bytes) -> Result<Response, ApiError> {
    let changes: RecipeChanges = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Rejected recipe payload: {}", e);
        ApiError::MalformedBody
    })?;

    let lookup_id = id.clone();
    let updated = in_store(store, move |s| s.update_by_id(&lookup_id, &changes)).await?;
    if updated == 0 {
        tracing::debug!(%id, "update matched no recipe");
    }

    Ok(Json(MessageResponse::new("Recipe updated successfully")).into_response())
}
