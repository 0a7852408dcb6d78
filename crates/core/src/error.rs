#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate natural key in {entity}: {key}")]
    DuplicateKey { entity: &'static str, key: String },

    #[error("Cycle in {entity} hierarchy at '{slug}'")]
    HierarchyCycle { entity: &'static str, slug: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(errors.to_string())
    }
}
