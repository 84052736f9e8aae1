//! Mapping from sqlx errors to the domain error taxonomy.

use kintree_core::error::CoreError;

/// PostgreSQL SQLSTATE codes this layer distinguishes.
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

/// Classify a sqlx error into a [`CoreError`].
///
/// - Unique violations map to `Conflict`.
/// - Foreign key violations map to `Conflict` (dangling or still-referenced person).
/// - Check violations map to `Validation`.
/// - Everything else maps to `Storage` with the driver message logged.
pub fn classify(err: sqlx::Error) -> CoreError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) => CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                )),
                Some(FOREIGN_KEY_VIOLATION) => CoreError::Conflict(format!(
                    "Person reference violates constraint: {constraint}"
                )),
                Some(CHECK_VIOLATION) => {
                    CoreError::Validation(format!("Record violates constraint: {constraint}"))
                }
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    CoreError::Storage(db_err.to_string())
                }
            }
        }
        other => {
            tracing::error!(error = %other, "Database error");
            CoreError::Storage(other.to_string())
        }
    }
}
