/// Person identifiers are server-generated UUIDv7 strings.
pub type PersonId = String;

/// All database primary keys for append-only tables are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (birth/death) carry no time component.
pub type Date = chrono::NaiveDate;

/// Generate a fresh, time-ordered person id.
pub fn new_person_id() -> PersonId {
    uuid::Uuid::now_v7().to_string()
}
