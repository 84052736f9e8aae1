//! HTTP-level tests for relationship path search.

mod common;

use axum::http::StatusCode;
use common::{add, body_json, id_of, post_json};
use serde_json::json;

#[tokio::test]
async fn test_path_through_parent_and_spouse() {
    let app = common::build_test_app(common::test_state());
    let root = add(&app, None, None, "Margaret").await;
    let child = add(&app, Some(&id_of(&root)), Some("child"), "Peter").await;
    let in_law = add(&app, Some(&id_of(&child)), Some("spouse"), "Anna").await;

    let response = post_json(
        app,
        "/api/v1/relationship-path",
        json!({"person1Id": id_of(&root), "person2Id": id_of(&in_law)}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let path = body_json(response).await["data"].clone();
    let hops: Vec<_> = path
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["relationship"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(hops, vec!["start", "child", "spouse"]);
    assert_eq!(path[0]["personName"], "Margaret");
    assert_eq!(path[2]["personId"], in_law["id"]);
}

#[tokio::test]
async fn test_siblings_connect_through_parent() {
    let app = common::build_test_app(common::test_state());
    let root = add(&app, None, None, "Margaret").await;
    let a = add(&app, Some(&id_of(&root)), Some("child"), "Peter").await;
    let b = add(&app, Some(&id_of(&a)), Some("sibling"), "Paul").await;

    let response = post_json(
        app,
        "/api/v1/relationship-path",
        json!({"person1Id": id_of(&a), "person2Id": id_of(&b)}),
    )
    .await;

    let path = body_json(response).await["data"].clone();
    assert_eq!(path.as_array().unwrap().len(), 3);
    assert_eq!(path[1]["relationship"], "parent");
    assert_eq!(path[1]["personId"], root["id"]);
    assert_eq!(path[2]["relationship"], "child");
}

#[tokio::test]
async fn test_disconnected_people_yield_null() {
    let app = common::build_test_app(common::test_state());
    let a = add(&app, None, None, "Margaret").await;
    let b = add(&app, None, None, "Stranger").await;

    let response = post_json(
        app,
        "/api/v1/relationship-path",
        json!({"person1Id": id_of(&a), "person2Id": id_of(&b)}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"].is_null());
}

#[tokio::test]
async fn test_self_path_is_single_start() {
    let app = common::build_test_app(common::test_state());
    let a = add(&app, None, None, "Margaret").await;

    let response = post_json(
        app,
        "/api/v1/relationship-path",
        json!({"person1Id": id_of(&a), "person2Id": id_of(&a)}),
    )
    .await;

    let path = body_json(response).await["data"].clone();
    assert_eq!(path.as_array().unwrap().len(), 1);
    assert_eq!(path[0]["relationship"], "start");
}

#[tokio::test]
async fn test_missing_ids_are_bad_request() {
    let app = common::build_test_app(common::test_state());
    let response = post_json(
        app,
        "/api/v1/relationship-path",
        json!({"person1Id": "", "person2Id": "x"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_unknown_id_is_404() {
    let app = common::build_test_app(common::test_state());
    let a = add(&app, None, None, "Margaret").await;

    let response = post_json(
        app,
        "/api/v1/relationship-path",
        json!({"person1Id": id_of(&a), "person2Id": "nobody"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
