//! API key and CORS integration tests.
//!
//! Run with: `cargo test -p imgdrop-api --test auth_test`

mod helpers;

use axum::http::Method;
use axum_test::multipart::{MultipartForm, Part};
use helpers::{fixtures, setup_test_app, setup_test_app_with, TEST_API_KEY};
use serde_json::{json, Value};

fn forbidden_body() -> Value {
    json!({ "message": "Доступ заборонено: неправильний API ключ" })
}

fn svg_form() -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(fixtures::svg()))
        .file_name("logo.svg")
        .mime_type("image/svg+xml");
    MultipartForm::new().add_part("file", part)
}

#[tokio::test]
async fn test_upload_without_key_is_forbidden() {
    let app = setup_test_app().await;

    let response = app.client().post("/uploads").multipart(svg_form()).await;

    assert_eq!(response.status_code(), 403);
    assert_eq!(response.json::<Value>(), forbidden_body());
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_upload_with_wrong_key_is_forbidden() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/uploads")
        .add_header("x-api-key", "not-the-key")
        .multipart(svg_form())
        .await;

    assert_eq!(response.status_code(), 403);
    assert_eq!(response.json::<Value>(), forbidden_body());
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_delete_without_key_leaves_file() {
    let app = setup_test_app().await;
    let image_name = app.upload_ok(fixtures::svg(), "logo.svg", "image/svg+xml").await;

    let response = app
        .client()
        .delete(&format!("/uploads/{}", image_name))
        .await;

    assert_eq!(response.status_code(), 403);
    assert_eq!(response.json::<Value>(), forbidden_body());
    assert!(app.path_of(&image_name).exists());
}

#[tokio::test]
async fn test_delete_with_wrong_key_leaves_file() {
    let app = setup_test_app().await;
    let image_name = app.upload_ok(fixtures::svg(), "logo.svg", "image/svg+xml").await;

    let response = app
        .client()
        .delete(&format!("/uploads/{}", image_name))
        .add_header("x-api-key", format!("{}x", TEST_API_KEY))
        .await;

    assert_eq!(response.status_code(), 403);
    assert!(app.path_of(&image_name).exists());
}

#[tokio::test]
async fn test_get_is_public() {
    let app = setup_test_app().await;
    let image_name = app.upload_ok(fixtures::svg(), "logo.svg", "image/svg+xml").await;

    let response = app.client().get(&format!("/uploads/{}", image_name)).await;

    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_unknown_route_is_404_not_403() {
    let app = setup_test_app().await;

    let response = app.client().post("/elsewhere").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_unsupported_method_is_405_not_403() {
    let app = setup_test_app().await;

    let response = app.client().put("/uploads/logo.svg").await;
    assert_eq!(response.status_code(), 405);

    let response = app.client().get("/uploads").await;
    assert_eq!(response.status_code(), 405);
}

#[tokio::test]
async fn test_cors_preflight_from_allowed_origin() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .method(Method::OPTIONS, "/uploads")
        .add_header("origin", "https://admin.onemarket.in.ua")
        .add_header("access-control-request-method", "POST")
        .add_header("access-control-request-headers", "x-api-key,content-type")
        .await;

    assert_eq!(response.status_code(), 200);
    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "https://admin.onemarket.in.ua"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
    let allowed_headers = headers["access-control-allow-headers"].to_str().unwrap();
    assert!(allowed_headers.contains("x-api-key"));
}

#[tokio::test]
async fn test_cors_ignores_unknown_origin() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/")
        .add_header("origin", "https://evil.example")
        .await;

    assert_eq!(response.status_code(), 200);
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[tokio::test]
async fn test_cors_origins_from_config() {
    let app = setup_test_app_with(&[("CORS_ORIGINS", "https://shop.example/")]).await;

    let response = app
        .client()
        .get("/")
        .add_header("origin", "https://shop.example")
        .await;

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "https://shop.example"
    );
}
