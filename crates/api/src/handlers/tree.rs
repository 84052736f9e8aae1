//! Handler for fetching the reconstructed family tree.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use kintree_core::activity::actions;
use kintree_core::tree::build_tree;
use serde::Deserialize;

use crate::activity::{record, ClientInfo};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /tree`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeParams {
    /// Explicit root. Blank means "pick automatically".
    pub root_id: Option<String>,
}

/// GET /api/v1/tree
///
/// Rebuild the tree from a single snapshot of the store. Without `rootId`
/// the root candidate with the largest descendant subtree is used.
pub async fn get_tree(
    client: ClientInfo,
    State(state): State<AppState>,
    Query(params): Query<TreeParams>,
) -> AppResult<impl IntoResponse> {
    let root_id = params
        .root_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let records = state.store.list().await?;
    let tree = build_tree(&records, root_id)?;

    tracing::debug!(root_id = %tree.person.id, people = records.len(), "Tree built");
    record(
        &state,
        client,
        actions::VIEW_TREE,
        format!("Viewed family tree rooted at {}", tree.person.details.name),
    );

    Ok(Json(DataResponse { data: tree }))
}
