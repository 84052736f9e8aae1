//! Add / update / delete operations that preserve the graph invariants.
//!
//! Each operation is split into a pure planner (`plan_*`) that turns the
//! current records into a [`PersonWrite`] batch, and an async wrapper that
//! reads from an explicit store handle, plans, and applies the batch in one
//! atomic call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::person::{PersonDetails, PersonRecord, Placement};
use crate::store::{PersonStore, PersonWrite};
use crate::types::{new_person_id, PersonId};

// ---------------------------------------------------------------------------
// Relationship kinds and policies
// ---------------------------------------------------------------------------

/// How a new person relates to the anchor they are added against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    #[serde(alias = "Child")]
    Child,
    #[serde(alias = "Spouse")]
    Spouse,
    #[serde(alias = "Sibling")]
    Sibling,
    #[serde(alias = "Parent")]
    Parent,
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Relationship::Child => "child",
            Relationship::Spouse => "spouse",
            Relationship::Sibling => "sibling",
            Relationship::Parent => "parent",
        };
        f.write_str(s)
    }
}

/// What to do when adding a sibling to someone with no parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SiblingPolicy {
    /// Add the new person as a parentless root.
    #[default]
    Parentless,
    /// Refuse with a validation error.
    Reject,
}

impl FromStr for SiblingPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parentless" => Ok(SiblingPolicy::Parentless),
            "reject" => Ok(SiblingPolicy::Reject),
            other => Err(CoreError::Validation(format!(
                "Invalid sibling policy '{other}'. Must be one of: parentless, reject"
            ))),
        }
    }
}

/// Result of a delete, echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub message: String,
    pub person_name: String,
    /// Former children that are now roots.
    pub orphaned: usize,
}

// ---------------------------------------------------------------------------
// Planners
// ---------------------------------------------------------------------------

/// Plan the insertion of `new_id` relative to `anchor`.
///
/// Without an anchor the new person is a standalone root and `relationship`
/// must be `None`. Returns the record as it will be stored plus the batch.
pub fn plan_add(
    anchor: Option<&PersonRecord>,
    relationship: Option<Relationship>,
    new_id: PersonId,
    details: PersonDetails,
    sibling_policy: SiblingPolicy,
) -> Result<(PersonRecord, Vec<PersonWrite>), CoreError> {
    let (anchor, relationship) = match (anchor, relationship) {
        (None, None) => {
            let record = PersonRecord::new(new_id, details, Placement::Root);
            return Ok((record.clone(), vec![PersonWrite::Insert(record)]));
        }
        (None, Some(_)) => {
            return Err(CoreError::Validation(
                "relationship requires relativeToId".into(),
            ))
        }
        (Some(_), None) => {
            return Err(CoreError::Validation(
                "relativeToId requires a relationship".into(),
            ))
        }
        (Some(anchor), Some(relationship)) => (anchor, relationship),
    };

    match relationship {
        Relationship::Child => {
            let record = PersonRecord::new(new_id, details, Placement::ChildOf(anchor.id.clone()));
            Ok((record.clone(), vec![PersonWrite::Insert(record)]))
        }
        Relationship::Sibling => {
            // The sibling inherits the anchor's placement; only a root anchor
            // leaves it open.
            let placement = match &anchor.placement {
                Placement::ChildOf(parent) => Placement::ChildOf(parent.clone()),
                Placement::SpouseOnly => Placement::SpouseOnly,
                Placement::Root => match sibling_policy {
                    SiblingPolicy::Parentless => Placement::Root,
                    SiblingPolicy::Reject => {
                        return Err(CoreError::Validation(format!(
                            "{} has no parent; cannot add a sibling",
                            anchor.name()
                        )))
                    }
                },
            };
            let record = PersonRecord::new(new_id, details, placement);
            Ok((record.clone(), vec![PersonWrite::Insert(record)]))
        }
        Relationship::Spouse => {
            if let Some(existing) = &anchor.spouse_id {
                return Err(CoreError::Conflict(format!(
                    "{} already has a spouse ({existing})",
                    anchor.name()
                )));
            }
            let mut record = PersonRecord::new(new_id, details, Placement::SpouseOnly);
            record.spouse_id = Some(anchor.id.clone());
            let batch = vec![
                PersonWrite::Insert(record.clone()),
                PersonWrite::SetSpouse {
                    id: anchor.id.clone(),
                    spouse_id: Some(record.id.clone()),
                },
            ];
            Ok((record, batch))
        }
        Relationship::Parent => {
            let record = PersonRecord::new(new_id, details, Placement::Root);
            let batch = vec![
                PersonWrite::Insert(record.clone()),
                PersonWrite::SetPlacement {
                    id: anchor.id.clone(),
                    placement: Placement::ChildOf(record.id.clone()),
                },
            ];
            Ok((record, batch))
        }
    }
}

/// Plan an overwrite of `person`'s details and, optionally, their spouse's.
pub fn plan_update(
    person: &PersonRecord,
    details: PersonDetails,
    spouse_details: Option<PersonDetails>,
) -> Result<Vec<PersonWrite>, CoreError> {
    let mut batch = vec![PersonWrite::UpdateDetails {
        id: person.id.clone(),
        details,
    }];

    if let Some(spouse_details) = spouse_details {
        let spouse_id = person.spouse_id.clone().ok_or_else(|| {
            CoreError::Validation(format!("{} has no spouse to update", person.name()))
        })?;
        batch.push(PersonWrite::UpdateDetails {
            id: spouse_id,
            details: spouse_details,
        });
    }

    Ok(batch)
}

/// Plan a non-cascading delete of `person`.
///
/// The spouse's back-link is cleared only when it actually points at the
/// deleted person. Children are orphaned, never removed.
pub fn plan_delete(person: &PersonRecord, spouse: Option<&PersonRecord>) -> Vec<PersonWrite> {
    let mut batch = Vec::with_capacity(3);

    if let Some(spouse) = spouse {
        if spouse.spouse_id.as_deref() == Some(person.id.as_str()) {
            batch.push(PersonWrite::SetSpouse {
                id: spouse.id.clone(),
                spouse_id: None,
            });
        }
    }

    batch.push(PersonWrite::OrphanChildren {
        parent_id: person.id.clone(),
    });
    batch.push(PersonWrite::Delete {
        id: person.id.clone(),
    });
    batch
}

// ---------------------------------------------------------------------------
// Store-backed operations
// ---------------------------------------------------------------------------

/// Add a person, optionally relative to an existing anchor.
pub async fn add_person<S: PersonStore + ?Sized>(
    store: &S,
    relative_to_id: Option<&str>,
    relationship: Option<Relationship>,
    details: PersonDetails,
    sibling_policy: SiblingPolicy,
) -> Result<PersonRecord, CoreError> {
    let anchor = match relative_to_id {
        Some(id) => Some(store.require(id).await?),
        None => None,
    };

    let (record, batch) = plan_add(
        anchor.as_ref(),
        relationship,
        new_person_id(),
        details,
        sibling_policy,
    )?;
    store.apply(batch).await?;
    Ok(record)
}

/// Overwrite a person's details (and their spouse's, if supplied).
pub async fn update_person<S: PersonStore + ?Sized>(
    store: &S,
    id: &str,
    details: PersonDetails,
    spouse_details: Option<PersonDetails>,
) -> Result<PersonRecord, CoreError> {
    let person = store.require(id).await?;
    let batch = plan_update(&person, details, spouse_details)?;
    store.apply(batch).await?;
    store.require(id).await
}

/// Delete a person, unlinking their spouse and orphaning their children.
pub async fn delete_person<S: PersonStore + ?Sized>(
    store: &S,
    id: &str,
) -> Result<DeleteOutcome, CoreError> {
    let records = store.list().await?;
    let person = records
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| CoreError::person_not_found(id))?;
    let spouse = person
        .spouse_id
        .as_deref()
        .and_then(|sid| records.iter().find(|r| r.id == sid));
    let orphaned = records
        .iter()
        .filter(|r| r.parent_id() == Some(id))
        .count();

    store.apply(plan_delete(person, spouse)).await?;

    Ok(DeleteOutcome {
        message: format!("{} was removed from the family tree", person.name()),
        person_name: person.name().to_string(),
        orphaned,
    })
}
