pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod route;
pub mod update;

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::Method;
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use utoipa::OpenApi;

use crate::api::ApiError;
use crate::store::{RecipeStore, StoreError};
use crate::AppState;
use route::RecipeRequest;

/// Returns the router for recipe endpoints mounted under `prefix`.
///
/// Every method is accepted so that unsupported ones get a JSON 405 from
/// [`route::parse`] rather than axum's empty default.
pub fn router(prefix: &str) -> Router<AppState> {
    if prefix.is_empty() {
        return Router::new()
            .route("/", any(dispatch_root))
            .route("/{*path}", any(dispatch_path));
    }

    Router::new()
        .route(prefix, any(dispatch_root))
        .route(&format!("{prefix}/"), any(dispatch_root))
        .route(&format!("{prefix}/{{*path}}"), any(dispatch_path))
}

// Extractor rejections are taken as values so they answer with the same
// JSON error body as everything else.
async fn dispatch_root(
    State(store): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    dispatch(store, &method, "", body?).await
}

async fn dispatch_path(
    State(store): State<AppState>,
    method: Method,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let Path(path) = path?;
    dispatch(store, &method, &path, body?).await
}

async fn dispatch(
    store: AppState,
    method: &Method,
    path: &str,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request = route::parse(method, path)?;
    tracing::debug!(?request, "dispatching recipe request");

    match request {
        RecipeRequest::List => list::list_recipes(store).await,
        RecipeRequest::ByCuisine(cuisine) => list::recipes_by_cuisine(store, cuisine).await,
        RecipeRequest::TopRated(limit) => list::top_rated_recipes(store, limit).await,
        RecipeRequest::Search(query) => list::search_recipes(store, query).await,
        RecipeRequest::Get(id) => get::get_recipe(store, id).await,
        RecipeRequest::Create => create::create_recipe(store, body).await,
        RecipeRequest::Update(id) => update::update_recipe(store, id, body).await,
        RecipeRequest::Delete(id) => delete::delete_recipe(store, id).await,
    }
}

/// Run one store operation on the blocking pool.
///
/// Store failures are logged here with full detail; callers only see the
/// mapped [`ApiError`].
pub(crate) async fn in_store<T, F>(store: AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn RecipeStore) -> Result<T, StoreError> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|e| {
            tracing::error!("Recipe store task failed: {}", e);
            ApiError::Internal
        })?;

    result.map_err(|e| {
        match &e {
            StoreError::InvalidArgument(msg) => tracing::debug!("Rejected store call: {}", msg),
            _ => tracing::error!("Recipe store operation failed: {}", e),
        }
        ApiError::from(e)
    })
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        list::recipes_by_cuisine,
        list::top_rated_recipes,
        list::search_recipes,
        get::get_recipe,
        create::create_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        crate::models::Recipe,
        crate::models::NewRecipe,
        crate::models::RecipeChanges,
        create::CreateRecipeResponse,
    ))
)]
pub struct ApiDoc;
