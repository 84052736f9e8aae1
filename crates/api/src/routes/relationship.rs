use axum::routing::post;
use axum::Router;

use crate::handlers::relationship;
use crate::state::AppState;

/// Relationship routes mounted at `/relationship-path`.
///
/// ```text
/// POST   /                  -> find_relationship
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(relationship::find_relationship))
}
