//! Route configuration and setup

use crate::auth::{api_key_middleware, AuthState, API_KEY_HEADER};
use crate::handlers;
use crate::middleware::{
    request_id::REQUEST_ID_HEADER, request_id_middleware, security_headers_middleware,
    SecurityHeadersConfig,
};
use crate::state::AppState;
use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use imgdrop_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the application router.
///
/// `POST /uploads` and `DELETE /uploads/{filename}` sit behind the API key
/// middleware; `GET /` and `GET /uploads/{filename}` are public.
pub fn build_router(state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let config = state.config.clone();
    let cors = setup_cors(&config)?;
    let auth_state = Arc::new(AuthState::from_config(&config));

    // Per-method route_layer: unmatched paths still 404 and other methods 405
    let require_api_key = axum::middleware::from_fn_with_state(auth_state, api_key_middleware);

    let routes = Router::new()
        .route("/", get(handlers::health::hello))
        .route(
            "/uploads",
            post(handlers::file_upload::upload_file)
                .layer(DefaultBodyLimit::max(config.max_file_size_bytes))
                .route_layer(require_api_key.clone()),
        )
        .route(
            "/uploads/{filename}",
            get(handlers::file_get::get_file).merge(
                delete(handlers::file_delete::delete_file).route_layer(require_api_key),
            ),
        );

    let security_headers_config = Arc::new(SecurityHeadersConfig::new(config.is_production()));

    let app = routes
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn_with_state(
            security_headers_config,
            security_headers_middleware,
        ))
        .with_state(state);

    tracing::info!(
        max_file_size_bytes = config.max_file_size_bytes,
        cors_origins = %config.cors_origins.join(","),
        "Routes configured"
    );

    Ok(app)
}

/// Setup CORS configuration
///
/// The origin list comes from `Config`, which already refuses a wildcard
/// combined with credentials.
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];
    let headers = [header::CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)];
    let exposed = [HeaderName::from_static(REQUEST_ID_HEADER)];

    let cors = if config.allows_any_origin() {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(headers)
            .expose_headers(exposed)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {}", o))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(headers)
            .expose_headers(exposed)
            .allow_credentials(config.cors_allow_credentials)
    };
    Ok(cors)
}
