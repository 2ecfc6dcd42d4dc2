use axum::Json;
use imgdrop_core::messages;

/// Liveness probe; always 200 with a JSON string body.
pub async fn hello() -> Json<&'static str> {
    Json(messages::HEALTH_CHECK)
}
