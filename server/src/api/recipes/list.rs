use axum::response::{IntoResponse, Response};
use axum::Json;

use super::in_store;
use crate::api::{ApiError, ErrorResponse};
use crate::models::Recipe;
use crate::store::{SortField, TextField};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "All recipes", body = [Recipe]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_recipes(store: AppState) -> Result<Response, ApiError> {
    let recipes = in_store(store, |s| s.find_all()).await?;
    Ok(Json(recipes).into_response())
}

#[utoipa::path(
    get,
    path = "/api/recipes/cuisine/{cuisine}",
    tag = "recipes",
    params(
        ("cuisine" = String, Path, description = "Exact cuisine name")
    ),
    responses(
        (status = 200, description = "Recipes of this cuisine", body = [Recipe]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn recipes_by_cuisine(store: AppState, cuisine: String) -> Result<Response, ApiError> {
    let recipes = in_store(store, move |s| s.find_by_field(TextField::Cuisine, &cuisine)).await?;
    Ok(Json(recipes).into_response())
}

#[utoipa::path(
    get,
    path = "/api/recipes/top/{n}",
    tag = "recipes",
    params(
        ("n" = u32, Path, description = "Maximum number of recipes to return")
    ),
    responses(
        (status = 200, description = "Highest rated recipes first", body = [Recipe]),
        (status = 400, description = "Limit is not a non-negative integer", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn top_rated_recipes(store: AppState, limit: u32) -> Result<Response, ApiError> {
    let recipes = in_store(store, move |s| s.find_top_n(limit, SortField::Rating, true)).await?;
    Ok(Json(recipes).into_response())
}

#[utoipa::path(
    get,
    path = "/api/recipes/search/{query}",
    tag = "recipes",
    params(
        ("query" = String, Path, description = "Case-insensitive substring of the recipe name")
    ),
    responses(
        (status = 200, description = "Matching recipes", body = [Recipe]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn search_recipes(store: AppState, query: String) -> Result<Response, ApiError> {
    let recipes = in_store(store, move |s| s.find_by_substring(TextField::Name, &query)).await?;
    Ok(Json(recipes).into_response())
}
