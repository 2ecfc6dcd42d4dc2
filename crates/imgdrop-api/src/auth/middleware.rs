use crate::error::HttpAppError;
use crate::middleware::get_request_id;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use imgdrop_core::{AppError, Config};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Header carrying the client's API key
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone)]
pub struct AuthState {
    pub api_key: String,
}

impl AuthState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.api_key.clone(),
        }
    }
}

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Reject the request with 403 unless `x-api-key` matches the configured key.
///
/// The downstream handler is never invoked on failure.
pub async fn api_key_middleware(
    State(auth_state): State<Arc<AuthState>>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok());
    let request_id = get_request_id(&request).unwrap_or_default();

    match provided {
        Some(key) if secure_compare(key, &auth_state.api_key) => next.run(request).await,
        Some(_) => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request_id,
                "Rejected request with invalid API key"
            );
            HttpAppError(AppError::Forbidden).into_response()
        }
        None => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request_id,
                "Rejected request without API key"
            );
            HttpAppError(AppError::Forbidden).into_response()
        }
    }
}
