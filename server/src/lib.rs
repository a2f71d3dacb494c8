//! Recipebox server: a JSON CRUD API over a recipe collection.
//!
//! The HTTP layer ([`api`]) decodes each request into one operation on a
//! [`store::RecipeStore`], which is built once at startup and shared through
//! axum state.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod schema;
pub mod store;

use std::sync::Arc;

use axum::extract::MatchedPath;
use axum::http::{header, HeaderValue, Method, Request};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

/// Application state shared across all handlers
pub type AppState = Arc<dyn store::RecipeStore>;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Build the full application router.
///
/// `prefix` is where the recipe endpoints are mounted; it should already be
/// normalized by [`config::normalize_prefix`].
pub fn app(state: AppState, prefix: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(api::recipes::router(prefix))
        .route(OPENAPI_PATH, get(api::openapi_json))
        .fallback(api::not_found)
        .with_state(state)
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_UTF8),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                        uri = %request.uri().path(),
                    )
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                ),
        )
}
