//! Row structs for the persisted tables.
//!
//! Each submodule contains a `FromRow` struct matching the database row and
//! its conversion into the corresponding `kintree_core` type.

pub mod activity;
pub mod person;
