use thiserror::Error;

/// Top-level error for profile replica operations
#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    /// No replica row yet: the identity may sit in the eventual-consistency
    /// window between registration and a successful sync
    #[error("Profile not found for identity {0}")]
    NotFound(i64),

    #[error("Invalid replication record: {0}")]
    InvalidRecord(String),

    #[error("Storage error: {0}")]
    PersistenceError(String),
}

impl From<anyhow::Error> for ProfileError {
    fn from(err: anyhow::Error) -> Self {
        ProfileError::PersistenceError(err.to_string())
    }
}
