pub mod activity;
pub mod health;
pub mod people;
pub mod relationship;
pub mod tree;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tree                       fetch the family tree (?rootId=)
///
/// /people                     list, create
/// /people/{id}                get, update, delete (?activeRootId=)
///
/// /relationship-path          shortest relationship path (POST)
///
/// /activity                   recent activity (?limit=&offset=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tree", tree::router())
        .nest("/people", people::router())
        .nest("/relationship-path", relationship::router())
        .nest("/activity", activity::router())
}
