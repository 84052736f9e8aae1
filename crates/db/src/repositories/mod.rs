//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` (reads) or `&mut PgConnection` (writes that may run inside a
//! caller-owned transaction) as the first argument.

pub mod activity_repo;
pub mod person_repo;

pub use activity_repo::ActivityRepo;
pub use person_repo::PersonRepo;
