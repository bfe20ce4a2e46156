use async_trait::async_trait;

use crate::profile::errors::ProfileError;
use crate::profile::models::Profile;
use crate::profile::models::SyncProfileCommand;

/// Port for profile domain service operations.
#[async_trait]
pub trait ProfileServicePort: Send + Sync + 'static {
    /// Apply a sync push from identity-service.
    ///
    /// Idempotent: re-delivering the same record converges on the same
    /// replica row.
    ///
    /// # Errors
    /// * `PersistenceError` - Database operation failed
    async fn sync_profile(&self, command: SyncProfileCommand) -> Result<(), ProfileError>;

    /// Retrieve the replica row for one identity.
    ///
    /// # Errors
    /// * `NotFound` - No replica row for this identity yet
    /// * `PersistenceError` - Database operation failed
    async fn get_profile(&self, identity_id: i64) -> Result<Profile, ProfileError>;

    /// Retrieve every replica row.
    ///
    /// # Errors
    /// * `PersistenceError` - Database operation failed
    async fn list_profiles(&self) -> Result<Vec<Profile>, ProfileError>;
}

/// Persistence operations for the local identity replica.
#[async_trait]
pub trait ReplicaRepository: Send + Sync + 'static {
    /// Upsert a replica row (insert or overwrite by identity id).
    ///
    /// # Errors
    /// * `PersistenceError` - Database operation failed
    async fn upsert(&self, profile: Profile) -> Result<(), ProfileError>;

    /// Retrieve a replica row by identity id.
    ///
    /// # Errors
    /// * `PersistenceError` - Database operation failed
    async fn find(&self, identity_id: i64) -> Result<Option<Profile>, ProfileError>;

    /// Retrieve all replica rows.
    ///
    /// # Errors
    /// * `PersistenceError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Profile>, ProfileError>;
}
