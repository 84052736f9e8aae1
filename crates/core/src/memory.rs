//! In-process store implementations.
//!
//! Used by tests and by the server when no `DATABASE_URL` is configured.
//! Batches are applied to a copy of the table and swapped in only when every
//! write succeeds.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::activity::{ActivityEntry, NewActivityEntry};
use crate::error::CoreError;
use crate::person::{PersonRecord, Placement};
use crate::store::{ActivityLog, PersonStore, PersonWrite};

/// Person table held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<PersonRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing records, bypassing validation.
    pub fn with_records(records: Vec<PersonRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

fn find_mut<'a>(
    records: &'a mut [PersonRecord],
    id: &str,
) -> Result<&'a mut PersonRecord, CoreError> {
    records
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| CoreError::person_not_found(id))
}

fn apply_one(records: &mut Vec<PersonRecord>, write: PersonWrite) -> Result<(), CoreError> {
    match write {
        PersonWrite::Insert(record) => {
            if records.iter().any(|r| r.id == record.id) {
                return Err(CoreError::Conflict(format!(
                    "Person with id {} already exists",
                    record.id
                )));
            }
            records.push(record);
        }
        PersonWrite::UpdateDetails { id, details } => {
            find_mut(records, &id)?.details = details;
        }
        PersonWrite::SetPlacement { id, placement } => {
            find_mut(records, &id)?.placement = placement;
        }
        PersonWrite::SetSpouse { id, spouse_id } => {
            find_mut(records, &id)?.spouse_id = spouse_id;
        }
        PersonWrite::OrphanChildren { parent_id } => {
            for record in records.iter_mut() {
                if record.parent_id() == Some(parent_id.as_str()) {
                    record.placement = Placement::Root;
                }
            }
        }
        PersonWrite::Delete { id } => {
            let idx = records
                .iter()
                .position(|r| r.id == id)
                .ok_or_else(|| CoreError::person_not_found(&id))?;
            records.remove(idx);
        }
    }
    Ok(())
}

#[async_trait]
impl PersonStore for MemoryStore {
    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<PersonRecord>, CoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<PersonRecord>, CoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn apply(&self, batch: Vec<PersonWrite>) -> Result<(), CoreError> {
        let mut records = self.records.write().await;
        let mut staged = records.clone();
        for write in batch {
            apply_one(&mut staged, write)?;
        }
        *records = staged;
        Ok(())
    }
}

/// Activity log held in memory.
#[derive(Debug, Default)]
pub struct MemoryActivityLog {
    entries: RwLock<Vec<ActivityEntry>>,
}

impl MemoryActivityLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityLog for MemoryActivityLog {
    async fn append(&self, entry: NewActivityEntry) -> Result<ActivityEntry, CoreError> {
        let mut entries = self.entries.write().await;
        let stored = ActivityEntry {
            id: entries.len() as i64 + 1,
            timestamp: Utc::now(),
            ip: entry.ip,
            user_id: entry.user_id,
            user_name: entry.user_name,
            action: entry.action,
            details: entry.details,
            city: entry.city,
            browser: entry.browser,
        };
        entries.push(stored.clone());
        Ok(stored)
    }

    async fn recent(&self, limit: i64, offset: i64) -> Result<Vec<ActivityEntry>, CoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .rev()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }
}
