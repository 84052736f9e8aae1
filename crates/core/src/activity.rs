//! Activity log entries, action names, and request metadata helpers.
//!
//! Entries are informational: written fire-and-forget after a successful
//! operation and read back only for display.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Action type constants
// ---------------------------------------------------------------------------

/// Known action types for activity entries.
pub mod actions {
    pub const VIEW_TREE: &str = "view_tree";
    pub const ADD_PERSON: &str = "add_person";
    pub const UPDATE_PERSON: &str = "update_person";
    pub const DELETE_PERSON: &str = "delete_person";
    pub const FIND_RELATIONSHIP: &str = "find_relationship";
}

/// Default page size for activity listing.
pub const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for activity listing.
pub const MAX_LIMIT: i64 = 500;

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A stored activity entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
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

/// An entry to append. The sink assigns `id` and `timestamp`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivityEntry {
    pub ip: String,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub action: String,
    pub details: String,
    pub city: Option<String>,
    pub browser: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Clamp client-supplied pagination to sane bounds.
pub fn clamp_page(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}

/// Best-effort browser family from a `User-Agent` header.
///
/// Order matters: Edge and Opera embed "Chrome", and Chrome embeds "Safari".
pub fn browser_from_user_agent(user_agent: &str) -> Option<&'static str> {
    const FAMILIES: &[(&str, &str)] = &[
        ("Edg/", "Edge"),
        ("OPR/", "Opera"),
        ("Firefox/", "Firefox"),
        ("Chrome/", "Chrome"),
        ("Safari/", "Safari"),
        ("curl/", "curl"),
    ];

    FAMILIES
        .iter()
        .find(|(marker, _)| user_agent.contains(marker))
        .map(|(_, family)| *family)
}

/// First address in an `X-Forwarded-For` chain.
pub fn client_ip_from_forwarded(header: &str) -> Option<&str> {
    header
        .split(',')
        .map(str::trim)
        .find(|part| !part.is_empty())
}
