//! Activity log row model. Rows have no `updated_at` (append-only).

use kintree_core::activity::ActivityEntry;
use kintree_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `activity_logs` table.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityRow {
    pub id: DbId,
    pub timestamp: Timestamp,
    pub ip: String,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub action: String,
    pub details: String,
    pub city: Option<String>,
    pub browser: Option<String>,
}

impl From<ActivityRow> for ActivityEntry {
    fn from(row: ActivityRow) -> Self {
        ActivityEntry {
            id: row.id,
            timestamp: row.timestamp,
            ip: row.ip,
            user_id: row.user_id,
            user_name: row.user_name,
            action: row.action,
            details: row.details,
            city: row.city,
            browser: row.browser,
        }
    }
}
