//! Shared setup for integration tests: an in-memory SQLite store behind the real router.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use smart_edu_api::api::{create_router, AppState};
use smart_edu_api::{Config, Database};

/// Migrated in-memory database.
///
/// One pooled connection, since every SQLite memory connection is its own database.
pub async fn test_database() -> Arc<Database> {
    let mut config = Config::with_database_url("sqlite::memory:");
    config.database_max_connections = 1;

    Arc::new(
        Database::connect(&config)
            .await
            .expect("in-memory database should migrate"),
    )
}

pub async fn test_app() -> Router {
    create_router(AppState::from_database(test_database().await))
}

/// Send one request and decode the JSON body
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

/// Create a student user and return `(user id, student id)`
pub async fn create_student(app: &Router, email: &str, code: &str) -> (i64, i64) {
    let (status, body) = post(
        app,
        "/users",
        json!({
            "email": email,
            "passwordHash": "not-a-real-hash",
            "name": "Test Student",
            "isStudent": true,
            "studentCode": code,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    (
        body["data"]["id"].as_i64().unwrap(),
        body["data"]["studentProfile"]["id"].as_i64().unwrap(),
    )
}

/// Create a course and return its id
pub async fn create_course(app: &Router, name: &str, code: &str) -> i64 {
    let (status, body) = post(app, "/api/courses", json!({ "name": name, "code": code })).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    body["data"]["id"].as_i64().unwrap()
}
