#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use kintree_core::mutation::SiblingPolicy;
use tower::ServiceExt;

use kintree_api::config::ServerConfig;
use kintree_api::router::build_app_router;
use kintree_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout. No database: state is in memory.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        db_max_connections: 1,
        sibling_policy: SiblingPolicy::Parentless,
    }
}

/// Fresh in-memory state.
pub fn test_state() -> AppState {
    AppState::in_memory(test_config())
}

/// Build the full application router over `state`.
///
/// Uses the same middleware stack as `main.rs`. The router is cheap to clone,
/// so tests clone it once per request to keep sharing the same stores.
pub fn build_test_app(state: AppState) -> Router {
    let config = state.config.as_ref().clone();
    build_app_router(state, &config)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Person payload with fixed gender and birth date.
pub fn person_data(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "gender": "Female",
        "birthDate": "1950-03-14",
    })
}

/// Create a person through the API and return the stored record.
pub async fn add(
    app: &Router,
    relative_to_id: Option<&str>,
    relationship: Option<&str>,
    name: &str,
) -> serde_json::Value {
    let response = post_json(
        app.clone(),
        "/api/v1/people",
        serde_json::json!({
            "relativeToId": relative_to_id,
            "relationship": relationship,
            "personData": person_data(name),
        }),
    )
    .await;
    assert_eq!(response.status(), 201, "creating {name} failed");
    body_json(response).await["data"].clone()
}

/// Id field of a JSON record.
pub fn id_of(record: &serde_json::Value) -> String {
    record["id"].as_str().unwrap().to_string()
}
