//! CRUD Round-Trip Tests
//!
//! Exercises the embedded-variant HTTP surface end to end:
//! - Created documents are retrievable with identical field values
//! - Update is a partial merge
//! - Delete removes the document
//! - The empty-collection read responds with the 400 error branch

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use encore::config::ReadVariant;
use encore::http::{router, AppState};
use encore::store::Store;

// =============================================================================
// Helper Functions
// =============================================================================

fn test_app() -> Router {
    let state = Arc::new(AppState::new(Store::in_memory(), ReadVariant::Embedded));
    router(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(payload) => builder
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn queen() -> Value {
    json!({
        "artistname": "Queen",
        "band_members": [
            {"singer_name": "Freddie", "instruments": ["vocals"]}
        ]
    })
}

// =============================================================================
// Welcome Route
// =============================================================================

#[tokio::test]
async fn welcome_route_returns_text() {
    let app = test_app();

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"welcome");
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn list_on_empty_collection_reports_error_branch() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/singers", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No documents in database");
}

#[tokio::test]
async fn list_returns_all_documents() {
    let app = test_app();
    send(&app, "POST", "/singer", Some(queen())).await;
    send(&app, "POST", "/singer", Some(json!({"artistname": "Rush"}))).await;

    let (status, body) = send(&app, "GET", "/singers", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

// =============================================================================
// Create + Get
// =============================================================================

#[tokio::test]
async fn created_document_is_retrievable_with_identical_fields() {
    let app = test_app();

    let (status, created) = send(&app, "POST", "/singer", Some(queen())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["document"]["artistname"], "Queen");
    assert_eq!(created["result"]["inserted_id"], created["document"]["_id"]);
    assert!(created["error"].is_null());

    let id = created["document"]["_id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/singer/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created["document"]);
}

#[tokio::test]
async fn create_rejects_payload_missing_artistname() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/singer",
        Some(json!({"band_members": []})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("artistname"));
}

#[tokio::test]
async fn create_rejects_undeclared_field() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/singer",
        Some(json!({"artistname": "Queen", "genre": "rock"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("genre"));
}

#[tokio::test]
async fn get_with_unknown_id_reports_error_branch() {
    let app = test_app();
    send(&app, "POST", "/singer", Some(queen())).await;

    let (status, body) = send(&app, "GET", "/singer/00000000aaaaaaaaaaaaaaaa", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No documents in database");
}

#[tokio::test]
async fn get_with_malformed_id_is_bad_request() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/singer/not-a-key", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("24 hex characters"));
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn update_is_partial_merge() {
    let app = test_app();
    let (_, created) = send(&app, "POST", "/singer", Some(queen())).await;
    let id = created["document"]["_id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/singer/{}", id),
        Some(json!({"artistname": "Queen II"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["artistname"], "Queen II");
    // Sibling field untouched by the merge
    assert_eq!(updated["band_members"], created["document"]["band_members"]);
}

#[tokio::test]
async fn update_with_unknown_id_returns_null_not_404() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "PATCH",
        "/singer/00000000aaaaaaaaaaaaaaaa",
        Some(json!({"artistname": "Nobody"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn update_rejects_non_object_body() {
    let app = test_app();
    let (_, created) = send(&app, "POST", "/singer", Some(queen())).await;
    let id = created["document"]["_id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/singer/{}", id),
        Some(json!(["not", "an", "object"])),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn delete_removes_document() {
    let app = test_app();
    let (_, created) = send(&app, "POST", "/singer", Some(queen())).await;
    let id = created["document"]["_id"].as_str().unwrap().to_string();

    let (status, deleted) = send(&app, "DELETE", &format!("/singer/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, created["document"]);

    // Gone afterwards
    let (status, body) = send(&app, "GET", &format!("/singer/{}", id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No documents in database");

    // Second delete matches nothing and returns null
    let (status, body) = send(&app, "DELETE", &format!("/singer/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}
