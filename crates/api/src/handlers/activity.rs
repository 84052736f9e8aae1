use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use kintree_core::activity::clamp_page;

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/activity
///
/// Most recent entries first.
pub async fn list_activity(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let (limit, offset) = clamp_page(params.limit, params.offset);
    let entries = state.activity.recent(limit, offset).await?;

    Ok(Json(DataResponse { data: entries }))
}
