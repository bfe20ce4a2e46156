use auth::InvalidRole;
use auth::TokenError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for DisplayName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DisplayNameError {
    #[error("Display name must not be blank")]
    Empty,

    #[error("Display name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for profile replication failures.
///
/// Never surfaced to the registering client; the orchestrator swallows it
/// at the boundary and logs the pending reconciliation.
#[derive(Debug, Clone, Error)]
pub enum ReplicationError {
    #[error("Sync endpoint rejected the record with status {0}")]
    Rejected(u16),

    #[error("Sync call timed out")]
    Timeout,

    #[error("Sync call failed: {0}")]
    Transport(String),
}

/// Top-level error for identity operations
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid display name: {0}")]
    InvalidDisplayName(#[from] DisplayNameError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] InvalidRole),

    // Domain-level errors
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// Bad email/password pair. Deliberately covers "email not found" too,
    /// so registered emails cannot be enumerated through login.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    // Infrastructure errors
    #[error("Storage error: {0}")]
    PersistenceError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for IdentityError {
    fn from(err: anyhow::Error) -> Self {
        IdentityError::Unknown(err.to_string())
    }
}
