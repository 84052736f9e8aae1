//! Storage capabilities consumed by the family-graph operations.
//!
//! Every operation receives its store handle explicitly. Reads take one
//! snapshot; writes are expressed as a [`PersonWrite`] batch that the
//! implementation must apply atomically, so paired writes (spouse linking,
//! update-with-spouse, delete-and-orphan) never land half-way.

use async_trait::async_trait;

use crate::activity::{ActivityEntry, NewActivityEntry};
use crate::error::CoreError;
use crate::person::{PersonDetails, PersonRecord, Placement};
use crate::types::PersonId;

/// A single write against the person table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonWrite {
    /// Insert a new record. Duplicate ids fail with `Conflict`.
    Insert(PersonRecord),
    /// Overwrite descriptive fields. Missing id fails with `NotFound`.
    UpdateDetails { id: PersonId, details: PersonDetails },
    /// Overwrite hierarchical placement. Missing id fails with `NotFound`.
    SetPlacement { id: PersonId, placement: Placement },
    /// Overwrite the spouse reference. Missing id fails with `NotFound`.
    SetSpouse {
        id: PersonId,
        spouse_id: Option<PersonId>,
    },
    /// Turn every child of `parent_id` into a root. Touching zero rows is fine.
    OrphanChildren { parent_id: PersonId },
    /// Remove a record. Missing id fails with `NotFound`.
    Delete { id: PersonId },
}

/// Persistent person records.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Check that the backing storage is reachable.
    async fn ping(&self) -> Result<(), CoreError>;

    async fn get(&self, id: &str) -> Result<Option<PersonRecord>, CoreError>;

    /// All records in stable (creation) order.
    async fn list(&self) -> Result<Vec<PersonRecord>, CoreError>;

    /// Apply every write or none of them.
    async fn apply(&self, batch: Vec<PersonWrite>) -> Result<(), CoreError>;

    async fn insert(&self, record: PersonRecord) -> Result<(), CoreError> {
        self.apply(vec![PersonWrite::Insert(record)]).await
    }

    async fn update_details(&self, id: &str, details: PersonDetails) -> Result<(), CoreError> {
        self.apply(vec![PersonWrite::UpdateDetails {
            id: id.to_string(),
            details,
        }])
        .await
    }

    async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.apply(vec![PersonWrite::Delete { id: id.to_string() }])
            .await
    }

    /// Fetch a record that must exist.
    async fn require(&self, id: &str) -> Result<PersonRecord, CoreError> {
        self.get(id)
            .await?
            .ok_or_else(|| CoreError::person_not_found(id))
    }
}

/// Append-only activity log sink.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn append(&self, entry: NewActivityEntry) -> Result<ActivityEntry, CoreError>;

    /// Most recent entries first.
    async fn recent(&self, limit: i64, offset: i64) -> Result<Vec<ActivityEntry>, CoreError>;
}
