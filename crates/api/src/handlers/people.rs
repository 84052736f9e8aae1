//! Handlers for person records.
//!
//! Creation, update and deletion go through the mutation engine in
//! `kintree_core::mutation`, which applies every write of an operation as a
//! single batch.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kintree_core::activity::actions;
use kintree_core::error::CoreError;
use kintree_core::mutation::{self, Relationship};
use kintree_core::person::{PersonInput, PersonSummary};
use kintree_core::types::PersonId;
use serde::Deserialize;

use crate::activity::{record, ClientInfo};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of `POST /people`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPersonRequest {
    /// Anchor person. Absent means the new person starts a tree of their own.
    pub relative_to_id: Option<PersonId>,
    pub relationship: Option<Relationship>,
    pub person_data: PersonInput,
}

/// Body of `PUT /people/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonRequest {
    pub person_data: PersonInput,
    #[serde(default, alias = "spouse")]
    pub spouse_data: Option<PersonInput>,
}

/// Query parameters for `DELETE /people/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParams {
    /// The root the client is currently viewing, which may not be deleted.
    pub active_root_id: Option<PersonId>,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/people
///
/// Flat list of every person in creation order.
pub async fn list_people(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let people: Vec<PersonSummary> = state
        .store
        .list()
        .await?
        .iter()
        .map(|r| r.summary())
        .collect();

    Ok(Json(DataResponse { data: people }))
}

/// GET /api/v1/people/{id}
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<PersonId>,
) -> AppResult<impl IntoResponse> {
    let person = state.store.require(&id).await?;
    Ok(Json(DataResponse { data: person }))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// POST /api/v1/people
///
/// Add a person relative to an existing anchor. Returns 201 with the record
/// as stored.
pub async fn create_person(
    client: ClientInfo,
    State(state): State<AppState>,
    Json(input): Json<AddPersonRequest>,
) -> AppResult<impl IntoResponse> {
    let details = input.person_data.into_details()?;
    let relative_to_id = input
        .relative_to_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let person = mutation::add_person(
        state.store.as_ref(),
        relative_to_id,
        input.relationship,
        details,
        state.config.sibling_policy,
    )
    .await?;

    tracing::info!(
        person_id = %person.id,
        relative_to_id = ?relative_to_id,
        relationship = ?input.relationship,
        "Person added",
    );

    let summary = match (input.relationship, relative_to_id) {
        (Some(rel), Some(anchor)) => format!("Added {} as {rel} of {anchor}", person.name()),
        _ => format!("Added {}", person.name()),
    };
    record(&state, client, actions::ADD_PERSON, summary);

    Ok((StatusCode::CREATED, Json(DataResponse { data: person })))
}

/// PUT /api/v1/people/{id}
///
/// Overwrite a person's details and, when `spouseData` is supplied, their
/// spouse's details in the same batch.
pub async fn update_person(
    client: ClientInfo,
    State(state): State<AppState>,
    Path(id): Path<PersonId>,
    Json(input): Json<UpdatePersonRequest>,
) -> AppResult<impl IntoResponse> {
    let details = input.person_data.into_details()?;
    let spouse_details = input
        .spouse_data
        .map(PersonInput::into_details)
        .transpose()?;
    let with_spouse = spouse_details.is_some();

    let person =
        mutation::update_person(state.store.as_ref(), &id, details, spouse_details).await?;

    tracing::info!(person_id = %id, with_spouse, "Person updated");
    record(
        &state,
        client,
        actions::UPDATE_PERSON,
        format!("Updated {}", person.name()),
    );

    Ok(Json(DataResponse { data: person }))
}

/// DELETE /api/v1/people/{id}
///
/// Non-cascading: children become roots and the spouse is unlinked. The
/// client's active root cannot be deleted.
pub async fn delete_person(
    client: ClientInfo,
    State(state): State<AppState>,
    Path(id): Path<PersonId>,
    Query(params): Query<DeleteParams>,
) -> AppResult<impl IntoResponse> {
    if params.active_root_id.as_deref() == Some(id.as_str()) {
        return Err(CoreError::Conflict(
            "Cannot delete the person at the root of the current view".into(),
        )
        .into());
    }

    let outcome = mutation::delete_person(state.store.as_ref(), &id).await?;

    tracing::info!(person_id = %id, orphaned = outcome.orphaned, "Person deleted");
    record(
        &state,
        client,
        actions::DELETE_PERSON,
        format!("Deleted {}", outcome.person_name),
    );

    Ok(Json(DataResponse { data: outcome }))
}
