//! HTTP-level tests for activity logging.

mod common;

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{add, body_json, get};
use kintree_api::state::AppState;
use tower::ServiceExt;

/// Activity is written by a detached task; give it a moment to land.
async fn wait_for_entries(state: &AppState, count: usize) {
    for _ in 0..100 {
        if state.activity.recent(500, 0).await.unwrap().len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("expected {count} activity entries");
}

#[tokio::test]
async fn test_mutations_are_logged_newest_first() {
    let state = common::test_state();
    let app = common::build_test_app(state.clone());
    add(&app, None, None, "Margaret").await;
    wait_for_entries(&state, 1).await;
    get(app.clone(), "/api/v1/tree").await;
    wait_for_entries(&state, 2).await;

    let response = get(app, "/api/v1/activity").await;
    assert_eq!(response.status(), StatusCode::OK);

    let entries = body_json(response).await["data"].clone();
    let actions: Vec<_> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(actions, vec!["view_tree", "add_person"]);
    assert!(entries[1]["details"].as_str().unwrap().contains("Margaret"));
    assert!(entries[0]["city"].is_null());
}

#[tokio::test]
async fn test_client_headers_are_recorded() {
    let state = common::test_state();
    let app = common::build_test_app(state.clone());
    add(&app, None, None, "Margaret").await;
    wait_for_entries(&state, 1).await;

    let request = Request::builder()
        .uri("/api/v1/tree")
        .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
        .header("x-user-id", "u-42")
        .header("x-user-name", "Ada")
        .header("user-agent", "Mozilla/5.0 Gecko/20100101 Firefox/121.0")
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap();
    wait_for_entries(&state, 2).await;

    let latest = &state.activity.recent(1, 0).await.unwrap()[0];
    assert_eq!(latest.ip, "203.0.113.9");
    assert_eq!(latest.user_id.as_deref(), Some("u-42"));
    assert_eq!(latest.user_name.as_deref(), Some("Ada"));
    assert_eq!(latest.browser.as_deref(), Some("Firefox"));
}

#[tokio::test]
async fn test_failed_requests_are_not_logged() {
    let state = common::test_state();
    let app = common::build_test_app(state.clone());

    let response = get(app, "/api/v1/people/nobody").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(state.activity.recent(10, 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_activity_pagination() {
    let state = common::test_state();
    let app = common::build_test_app(state.clone());
    for name in ["A", "B", "C"] {
        add(&app, None, None, name).await;
    }
    wait_for_entries(&state, 3).await;

    let response = get(app, "/api/v1/activity?limit=2&offset=1").await;
    let entries = body_json(response).await["data"].clone();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0]["details"].as_str().unwrap().contains('B'));
    assert!(entries[1]["details"].as_str().unwrap().contains('A'));
}
