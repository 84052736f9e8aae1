//! Person records, descriptive details, and hierarchical placement.
//!
//! A person's position in the hierarchy is a tagged [`Placement`] rather than
//! a nullable parent column overloaded with a sentinel string: a record is
//! either a root, the child of exactly one other record, or a spouse-only
//! record that never participates in root inference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::types::{Date, PersonId};

/// Maximum length (in characters) of a person's display name.
pub const MAX_NAME_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(CoreError::Validation(format!(
                "Invalid gender '{s}'. Must be one of: Male, Female, Other"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Details and placement
// ---------------------------------------------------------------------------

/// Descriptive attributes of a person. Carries no graph invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetails {
    pub name: String,
    pub gender: Gender,
    pub birth_date: Date,
    #[serde(default)]
    pub death_date: Option<Date>,
}

/// Where a record sits in the descent hierarchy.
///
/// Serialized as `{"placement": "root"}`, `{"placement": "childOf",
/// "parentId": "..."}` or `{"placement": "spouseOnly"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "placement", content = "parentId", rename_all = "camelCase")]
pub enum Placement {
    /// No hierarchical parent; eligible as a tree root.
    Root,
    /// Child of the referenced record.
    ChildOf(PersonId),
    /// Married into the tree. Never has a parent and is never a root candidate.
    SpouseOnly,
}

impl Placement {
    /// Storage value for the `placement` column.
    pub const ROOT: &'static str = "root";
    pub const CHILD: &'static str = "child";
    pub const SPOUSE: &'static str = "spouse";

    /// The hierarchical parent, if any.
    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Placement::ChildOf(parent) => Some(parent.as_str()),
            Placement::Root | Placement::SpouseOnly => None,
        }
    }

    pub fn is_spouse_only(&self) -> bool {
        matches!(self, Placement::SpouseOnly)
    }

    /// The `placement` column value for this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Placement::Root => Self::ROOT,
            Placement::ChildOf(_) => Self::CHILD,
            Placement::SpouseOnly => Self::SPOUSE,
        }
    }

    /// Rebuild a placement from its two storage columns.
    pub fn from_columns(kind: &str, parent_id: Option<String>) -> Result<Self, CoreError> {
        match (kind, parent_id) {
            (Self::ROOT, None) => Ok(Placement::Root),
            (Self::SPOUSE, None) => Ok(Placement::SpouseOnly),
            (Self::CHILD, Some(parent)) => Ok(Placement::ChildOf(parent)),
            (kind, parent) => Err(CoreError::CorruptTree(format!(
                "Inconsistent placement '{kind}' with parent {parent:?}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A person as stored: details plus the two relationship references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub id: PersonId,
    #[serde(flatten)]
    pub details: PersonDetails,
    #[serde(flatten)]
    pub placement: Placement,
    pub spouse_id: Option<PersonId>,
}

impl PersonRecord {
    pub fn new(id: impl Into<PersonId>, details: PersonDetails, placement: Placement) -> Self {
        Self {
            id: id.into(),
            details,
            placement,
            spouse_id: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.placement.parent_id()
    }

    pub fn summary(&self) -> PersonSummary {
        PersonSummary {
            id: self.id.clone(),
            details: self.details.clone(),
        }
    }
}

/// Flat list view of a person with no relationship fields exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    pub id: PersonId,
    #[serde(flatten)]
    pub details: PersonDetails,
}

// ---------------------------------------------------------------------------
// Input DTO
// ---------------------------------------------------------------------------

/// Person data as submitted by a client, validated before any write.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_lifespan"))]
pub struct PersonInput {
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(required(message = "gender is required"))]
    pub gender: Option<Gender>,
    #[validate(required(message = "birth date is required"))]
    pub birth_date: Option<Date>,
    pub death_date: Option<Date>,
}

impl PersonInput {
    /// Validate the input and convert it into stored details.
    pub fn into_details(self) -> Result<PersonDetails, CoreError> {
        self.validate()?;

        let gender = self
            .gender
            .ok_or_else(|| CoreError::Validation("gender is required".into()))?;
        let birth_date = self
            .birth_date
            .ok_or_else(|| CoreError::Validation("birth date is required".into()))?;

        Ok(PersonDetails {
            name: self.name.trim().to_string(),
            gender,
            birth_date,
            death_date: self.death_date,
        })
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("blank").with_message("name must not be blank".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::new("too_long")
            .with_message(format!("name must be at most {MAX_NAME_LEN} characters").into()));
    }
    Ok(())
}

fn validate_lifespan(input: &PersonInput) -> Result<(), ValidationError> {
    match (input.birth_date, input.death_date) {
        (Some(birth), Some(death)) if death < birth => Err(ValidationError::new("lifespan")
            .with_message("death date must not precede birth date".into())),
        _ => Ok(()),
    }
}
