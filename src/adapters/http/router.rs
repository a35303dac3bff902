//! Application router with the full middleware stack.
//!
//! Used by the binary and by the integration tests, so both exercise the
//! same layers.

use std::time::Duration;

use axum::{middleware, routing::get, Json, Router};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderName, HeaderValue, Method};
use serde::Serialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::account::account_routes;
use super::admin::admin_routes;
use super::billing::webhook_routes;
use super::catalog::catalog_routes;
use super::middleware::auth_middleware;
use super::state::AppState;
use crate::config::ServerConfig;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the complete application.
///
/// Layers, outermost first: CORS, request id, tracing, request id
/// propagation, timeout, compression, bearer auth.
pub fn app_router(state: AppState, config: &ServerConfig) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);
    let auth = middleware::from_fn_with_state(state.sessions.clone(), auth_middleware);

    Router::new()
        .route("/health", get(health))
        .merge(webhook_routes())
        .nest("/api/auth", account_routes())
        .nest("/api/courses", catalog_routes())
        .nest("/api/admin", admin_routes())
        .layer(auth)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors_layer(config))
        .with_state(state)
}

/// CORS from the configured origin list. Unparseable origins are skipped.
/// With no origins configured, only same-origin requests succeed in
/// production and any origin is allowed elsewhere.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    if !origins.is_empty() {
        layer.allow_origin(origins)
    } else if config.is_production() {
        layer
    } else {
        layer.allow_origin(tower_http::cors::Any)
    }
}
