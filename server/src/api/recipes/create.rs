use axum::body::Bytes;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::in_store;
use crate::api::{ApiError, ErrorResponse};
use crate::models::NewRecipe;
use crate::AppState;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub message: String,
    pub id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = NewRecipe,
    responses(
        (status = 200, description = "Recipe created successfully", body = CreateRecipeResponse),
        (status = 400, description = "Malformed recipe payload", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn create_recipe(store: AppState, body: Bytes) -> Result<Response, ApiError> {
    let recipe: NewRecipe = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Rejected recipe payload: {}", e);
        ApiError::MalformedBody
    })?;

    let id = in_store(store, move |s| s.insert(&recipe)).await?;
    tracing::info!(%id, "created recipe");

    Ok(Json(CreateRecipeResponse {
        message: "Recipe created successfully".to_string(),
        id,
    })
    .into_response())
}
