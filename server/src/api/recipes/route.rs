//! Maps a request's method and path info onto a [`RecipeRequest`].
//!
//! Parsing is pure: nothing here touches the store, so a malformed path is
//! rejected before any query is made.

use axum::http::Method;

use crate::api::ApiError;

/// One recipe operation, decoded from the request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeRequest {
    List,
    ByCuisine(String),
    TopRated(u32),
    Search(String),
    Get(String),
    Create,
    Update(String),
    Delete(String),
}

const CUISINE: &str = "cuisine/";
const TOP: &str = "top/";
const SEARCH: &str = "search/";

/// Parse the path info (the path below the mount prefix, already
/// percent-decoded) for `method`.
///
/// Everything after a `cuisine/`, `top/` or `search/` segment is the value,
/// slashes included.
pub fn parse(method: &Method, path: &str) -> Result<RecipeRequest, ApiError> {
    let path = path.strip_prefix('/').unwrap_or(path);

    match method {
        &Method::GET => parse_get(path),
        &Method::POST => Ok(RecipeRequest::Create),
        &Method::PUT => require_id(path).map(RecipeRequest::Update),
        &Method::DELETE => require_id(path).map(RecipeRequest::Delete),
        _ => Err(ApiError::MethodNotAllowed),
    }
}

fn parse_get(path: &str) -> Result<RecipeRequest, ApiError> {
    if path.is_empty() {
        return Ok(RecipeRequest::List);
    }
    if let Some(cuisine) = path.strip_prefix(CUISINE) {
        return Ok(RecipeRequest::ByCuisine(cuisine.to_string()));
    }
    if let Some(limit) = path.strip_prefix(TOP) {
        return limit
            .parse::<u32>()
            .map(RecipeRequest::TopRated)
            .map_err(|_| ApiError::InvalidArgument(format!("Invalid recipe limit: {limit}")));
    }
    if let Some(query) = path.strip_prefix(SEARCH) {
        return Ok(RecipeRequest::Search(query.to_string()));
    }
    Ok(RecipeRequest::Get(path.to_string()))
}

fn require_id(path: &str) -> Result<String, ApiError> {
    if path.is_empty() {
        return Err(ApiError::InvalidArgument(
            "Recipe id is required".to_string(),
        ));
    }
    Ok(path.to_string())
}
