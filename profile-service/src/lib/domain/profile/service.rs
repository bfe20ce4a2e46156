use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::profile::errors::ProfileError;
use crate::profile::models::Profile;
use crate::profile::models::SyncProfileCommand;
use crate::profile::ports::ProfileServicePort;
use crate::profile::ports::ReplicaRepository;

/// Domain service implementation for the local identity replica.
pub struct ProfileService<R>
where
    R: ReplicaRepository,
{
    repository: Arc<R>,
}

impl<R> ProfileService<R>
where
    R: ReplicaRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> ProfileServicePort for ProfileService<R>
where
    R: ReplicaRepository,
{
    async fn sync_profile(&self, command: SyncProfileCommand) -> Result<(), ProfileError> {
        let identity_id = command.identity_id;
        self.repository
            .upsert(command.into_profile(Utc::now()))
            .await?;

        tracing::debug!(identity_id, "Identity replica synced");
        Ok(())
    }

    async fn get_profile(&self, identity_id: i64) -> Result<Profile, ProfileError> {
        self.repository
            .find(identity_id)
            .await?
            .ok_or(ProfileError::NotFound(identity_id))
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, ProfileError> {
        self.repository.list_all().await
    }
}
