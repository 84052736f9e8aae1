//! Route definitions for person records.

use axum::routing::get;
use axum::Router;

use crate::handlers::people;
use crate::state::AppState;

/// Person routes mounted at `/people`.
///
/// ```text
/// GET    /                  -> list_people
/// POST   /                  -> create_person
/// GET    /{id}              -> get_person
/// PUT    /{id}              -> update_person
/// DELETE /{id}              -> delete_person (?activeRootId=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(people::list_people).post(people::create_person))
        .route(
            "/{id}",
            get(people::get_person)
                .put(people::update_person)
                .delete(people::delete_person),
        )
}
