#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("The family tree is empty")]
    EmptyTree,

    #[error("Corrupt family tree: {0}")]
    CorruptTree(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// Shorthand for a missing person record.
    pub fn person_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: "Person",
            id: id.into(),
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let detail = match &e.message {
                        Some(msg) => msg.to_string(),
                        None => e.code.to_string(),
                    };
                    // Struct-level (schema) errors are keyed under `__all__`.
                    if field == "__all__" {
                        detail
                    } else {
                        format!("{field}: {detail}")
                    }
                })
            })
            .collect();

        messages.sort();
        if messages.is_empty() {
            messages.push(errors.to_string());
        }
        CoreError::Validation(messages.join("; "))
    }
}
