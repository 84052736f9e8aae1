use axum::routing::get;
use axum::Router;

use crate::handlers::tree;
use crate::state::AppState;

/// Tree routes mounted at `/tree`.
///
/// ```text
/// GET    /                  -> get_tree (?rootId=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(tree::get_tree))
}
