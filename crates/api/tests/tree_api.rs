//! HTTP-level tests for tree reconstruction.

mod common;

use axum::http::StatusCode;
use common::{add, body_json, get, id_of};

#[tokio::test]
async fn test_empty_store_has_no_tree() {
    let app = common::build_test_app(common::test_state());
    let response = get(app, "/api/v1/tree").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "EMPTY_TREE");
}

#[tokio::test]
async fn test_tree_nests_children_and_spouses() {
    let app = common::build_test_app(common::test_state());
    let root = add(&app, None, None, "Margaret").await;
    let spouse = add(&app, Some(&id_of(&root)), Some("spouse"), "Harold").await;
    let child = add(&app, Some(&id_of(&root)), Some("child"), "Peter").await;
    add(&app, Some(&id_of(&child)), Some("child"), "Lucy").await;

    let response = get(app, "/api/v1/tree").await;
    assert_eq!(response.status(), StatusCode::OK);

    let tree = &body_json(response).await["data"];
    assert_eq!(tree["id"], root["id"]);
    assert_eq!(tree["spouse"]["id"], spouse["id"]);
    assert_eq!(tree["spouse"]["name"], "Harold");
    assert_eq!(tree["children"].as_array().unwrap().len(), 1);
    assert_eq!(tree["children"][0]["id"], child["id"]);
    assert_eq!(tree["children"][0]["children"][0]["name"], "Lucy");
}

#[tokio::test]
async fn test_auto_root_prefers_largest_subtree() {
    let app = common::build_test_app(common::test_state());
    let small = add(&app, None, None, "Small").await;
    add(&app, Some(&id_of(&small)), Some("child"), "Small Child").await;

    let big = add(&app, None, None, "Big").await;
    let kid = add(&app, Some(&id_of(&big)), Some("child"), "Big Child").await;
    add(&app, Some(&id_of(&kid)), Some("child"), "Big Grandchild").await;

    let response = get(app, "/api/v1/tree").await;
    let tree = &body_json(response).await["data"];
    assert_eq!(tree["id"], big["id"]);
}

#[tokio::test]
async fn test_parent_add_becomes_new_root() {
    let app = common::build_test_app(common::test_state());
    let root = add(&app, None, None, "Peter").await;
    let parent = add(&app, Some(&id_of(&root)), Some("parent"), "Margaret").await;

    let response = get(app, "/api/v1/tree").await;
    let tree = &body_json(response).await["data"];
    assert_eq!(tree["id"], parent["id"]);
    assert_eq!(tree["children"][0]["id"], root["id"]);
}

#[tokio::test]
async fn test_explicit_root_id() {
    let app = common::build_test_app(common::test_state());
    let root = add(&app, None, None, "Margaret").await;
    let child = add(&app, Some(&id_of(&root)), Some("child"), "Peter").await;

    let response = get(app.clone(), &format!("/api/v1/tree?rootId={}", id_of(&child))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], child["id"]);

    // Blank rootId falls back to automatic selection.
    let response = get(app, "/api/v1/tree?rootId=").await;
    assert_eq!(body_json(response).await["data"]["id"], root["id"]);
}

#[tokio::test]
async fn test_unknown_root_id_is_404() {
    let app = common::build_test_app(common::test_state());
    add(&app, None, None, "Margaret").await;

    let response = get(app, "/api/v1/tree?rootId=nobody").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
