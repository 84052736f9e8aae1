//! Person row model.

use kintree_core::error::CoreError;
use kintree_core::person::{Gender, PersonDetails, PersonRecord, Placement};
use kintree_core::types::{Date, Timestamp};
use sqlx::FromRow;

/// A row from the `persons` table.
#[derive(Debug, Clone, FromRow)]
pub struct PersonRow {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub birth_date: Date,
    pub death_date: Option<Date>,
    pub placement: String,
    pub parent_id: Option<String>,
    pub spouse_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<PersonRow> for PersonRecord {
    type Error = CoreError;

    fn try_from(row: PersonRow) -> Result<Self, Self::Error> {
        let gender: Gender = row.gender.parse().map_err(|_| {
            CoreError::CorruptTree(format!(
                "Person '{}' has unknown gender '{}'",
                row.id, row.gender
            ))
        })?;
        let placement = Placement::from_columns(&row.placement, row.parent_id)?;

        Ok(PersonRecord {
            id: row.id,
            details: PersonDetails {
                name: row.name,
                gender,
                birth_date: row.birth_date,
                death_date: row.death_date,
            },
            placement,
            spouse_id: row.spouse_id,
        })
    }
}
