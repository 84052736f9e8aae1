//! Repository for the `persons` table.

use kintree_core::person::{PersonDetails, PersonRecord, Placement};
use sqlx::{PgConnection, PgPool};

use crate::models::person::PersonRow;

/// Column list for persons queries.
const COLUMNS: &str = "id, name, gender, birth_date, death_date, \
    placement, parent_id, spouse_id, created_at, updated_at";

/// Provides reads and single-statement writes for person records.
pub struct PersonRepo;

impl PersonRepo {
    /// Find a person by primary key.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<PersonRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM persons WHERE id = $1");
        sqlx::query_as::<_, PersonRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every person in creation order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<PersonRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM persons ORDER BY seq ASC");
        sqlx::query_as::<_, PersonRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Count all persons.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM persons")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Insert a new person row.
    pub async fn insert(conn: &mut PgConnection, record: &PersonRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO persons
                (id, name, gender, birth_date, death_date, placement, parent_id, spouse_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&record.id)
        .bind(&record.details.name)
        .bind(record.details.gender.as_str())
        .bind(record.details.birth_date)
        .bind(record.details.death_date)
        .bind(record.placement.kind())
        .bind(record.placement.parent_id())
        .bind(&record.spouse_id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Overwrite descriptive fields. Returns `true` if a row was updated.
    pub async fn update_details(
        conn: &mut PgConnection,
        id: &str,
        details: &PersonDetails,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE persons SET
                name = $2, gender = $3, birth_date = $4, death_date = $5,
                updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&details.name)
        .bind(details.gender.as_str())
        .bind(details.birth_date)
        .bind(details.death_date)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrite placement and parent together. Returns `true` if a row was updated.
    pub async fn set_placement(
        conn: &mut PgConnection,
        id: &str,
        placement: &Placement,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE persons SET placement = $2, parent_id = $3, updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(placement.kind())
        .bind(placement.parent_id())
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrite the spouse reference. Returns `true` if a row was updated.
    pub async fn set_spouse(
        conn: &mut PgConnection,
        id: &str,
        spouse_id: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE persons SET spouse_id = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(spouse_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Turn every child of `parent_id` into a root. Returns the number of rows touched.
    pub async fn orphan_children(
        conn: &mut PgConnection,
        parent_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE persons SET placement = 'root', parent_id = NULL, updated_at = now()
             WHERE parent_id = $1",
        )
        .bind(parent_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a person. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
