use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use kintree_core::activity::actions;
use kintree_core::graph::find_path;
use kintree_core::types::PersonId;
use serde::Deserialize;

use crate::activity::{record, ClientInfo};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /relationship-path`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRequest {
    #[serde(default)]
    pub person1_id: PersonId,
    #[serde(default)]
    pub person2_id: PersonId,
}

/// POST /api/v1/relationship-path
///
/// Shortest chain of parent/child/spouse hops between two people, or `null`
/// when they are not connected.
pub async fn find_relationship(
    client: ClientInfo,
    State(state): State<AppState>,
    Json(input): Json<PathRequest>,
) -> AppResult<impl IntoResponse> {
    let from = input.person1_id.trim();
    let to = input.person2_id.trim();
    if from.is_empty() || to.is_empty() {
        return Err(AppError::BadRequest(
            "Both person1Id and person2Id are required".into(),
        ));
    }

    let records = state.store.list().await?;
    let path = find_path(&records, from, to)?;

    let hops = path.as_ref().map(|p| p.len().saturating_sub(1));
    tracing::debug!(from, to, hops = ?hops, "Relationship path searched");

    let endpoints = path.as_ref().and_then(|p| p.first().zip(p.last()));
    let summary = match endpoints {
        Some((first, last)) => format!(
            "Found relationship between {} and {} ({} hops)",
            first.person_name,
            last.person_name,
            hops.unwrap_or(0)
        ),
        None => format!("No relationship found between {from} and {to}"),
    };
    record(&state, client, actions::FIND_RELATIONSHIP, summary);

    Ok(Json(DataResponse { data: path }))
}
