//! Repository for the append-only `activity_logs` table.

use kintree_core::activity::NewActivityEntry;
use sqlx::PgPool;

use crate::models::activity::ActivityRow;

/// Column list for `activity_logs` SELECT queries.
const COLUMNS: &str = "\
    id, timestamp, ip, user_id, user_name, action, details, city, browser";

/// Provides insert and query operations for activity entries.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Append one entry, returning the stored row.
    pub async fn insert(pool: &PgPool, entry: &NewActivityEntry) -> Result<ActivityRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs
                (ip, user_id, user_name, action, details, city, browser)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(&entry.ip)
            .bind(&entry.user_id)
            .bind(&entry.user_name)
            .bind(&entry.action)
            .bind(&entry.details)
            .bind(&entry.city)
            .bind(&entry.browser)
            .fetch_one(pool)
            .await
    }

    /// Most recent entries first. Callers clamp `limit`/`offset`.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ActivityRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs
             ORDER BY timestamp DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
