use axum::routing::get;
use axum::Router;

use crate::handlers::activity;
use crate::state::AppState;

/// Activity routes mounted at `/activity`.
///
/// ```text
/// GET    /                  -> list_activity (?limit=&offset=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(activity::list_activity))
}
