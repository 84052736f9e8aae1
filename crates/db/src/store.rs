//! PostgreSQL implementations of the core storage traits.

use async_trait::async_trait;
use kintree_core::activity::{ActivityEntry, NewActivityEntry};
use kintree_core::error::CoreError;
use kintree_core::person::PersonRecord;
use kintree_core::store::{ActivityLog, PersonStore, PersonWrite};
use sqlx::PgConnection;

use crate::error::classify;
use crate::repositories::{ActivityRepo, PersonRepo};
use crate::DbPool;

/// [`PersonStore`] backed by the `persons` table.
#[derive(Clone)]
pub struct PgPersonStore {
    pool: DbPool,
}

impl PgPersonStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Fail with `NotFound` when a targeted write touched no row.
fn require_found(found: bool, id: &str) -> Result<(), CoreError> {
    if found {
        Ok(())
    } else {
        Err(CoreError::person_not_found(id))
    }
}

async fn apply_write(conn: &mut PgConnection, write: &PersonWrite) -> Result<(), CoreError> {
    match write {
        PersonWrite::Insert(record) => {
            PersonRepo::insert(conn, record).await.map_err(classify)?;
        }
        PersonWrite::UpdateDetails { id, details } => {
            let found = PersonRepo::update_details(conn, id, details)
                .await
                .map_err(classify)?;
            require_found(found, id)?;
        }
        PersonWrite::SetPlacement { id, placement } => {
            let found = PersonRepo::set_placement(conn, id, placement)
                .await
                .map_err(classify)?;
            require_found(found, id)?;
        }
        PersonWrite::SetSpouse { id, spouse_id } => {
            let found = PersonRepo::set_spouse(conn, id, spouse_id.as_deref())
                .await
                .map_err(classify)?;
            require_found(found, id)?;
        }
        PersonWrite::OrphanChildren { parent_id } => {
            let orphaned = PersonRepo::orphan_children(conn, parent_id)
                .await
                .map_err(classify)?;
            tracing::debug!(parent_id = %parent_id, orphaned, "Orphaned children");
        }
        PersonWrite::Delete { id } => {
            let found = PersonRepo::delete(conn, id).await.map_err(classify)?;
            require_found(found, id)?;
        }
    }
    Ok(())
}

#[async_trait]
impl PersonStore for PgPersonStore {
    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool).await.map_err(classify)
    }

    async fn get(&self, id: &str) -> Result<Option<PersonRecord>, CoreError> {
        PersonRepo::find_by_id(&self.pool, id)
            .await
            .map_err(classify)?
            .map(PersonRecord::try_from)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<PersonRecord>, CoreError> {
        PersonRepo::list_all(&self.pool)
            .await
            .map_err(classify)?
            .into_iter()
            .map(PersonRecord::try_from)
            .collect()
    }

    /// Runs the whole batch in one transaction; any failure rolls it back.
    async fn apply(&self, batch: Vec<PersonWrite>) -> Result<(), CoreError> {
        let mut tx = self.pool.begin().await.map_err(classify)?;

        for write in &batch {
            // Dropping `tx` on the error path rolls back.
            apply_write(&mut *tx, write).await?;
        }

        tx.commit().await.map_err(classify)?;
        tracing::debug!(writes = batch.len(), "Applied person write batch");
        Ok(())
    }
}

/// [`ActivityLog`] backed by the `activity_logs` table.
#[derive(Clone)]
pub struct PgActivityLog {
    pool: DbPool,
}

impl PgActivityLog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityLog for PgActivityLog {
    async fn append(&self, entry: NewActivityEntry) -> Result<ActivityEntry, CoreError> {
        ActivityRepo::insert(&self.pool, &entry)
            .await
            .map(ActivityEntry::from)
            .map_err(classify)
    }

    async fn recent(&self, limit: i64, offset: i64) -> Result<Vec<ActivityEntry>, CoreError> {
        let rows = ActivityRepo::list_recent(&self.pool, limit, offset)
            .await
            .map_err(classify)?;
        Ok(rows.into_iter().map(ActivityEntry::from).collect())
    }
}
