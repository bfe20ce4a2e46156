use std::time::Duration;

use async_trait::async_trait;

use crate::config::ReplicationConfig;
use crate::identity::errors::ReplicationError;
use crate::identity::models::ReplicationRecord;
use crate::identity::ports::ProfileReplicator;

/// HTTP implementation of the profile replicator.
///
/// Pushes each freshly registered identity to profile-service's internal
/// sync endpoint. The call is bounded by the configured timeout so a slow
/// or unreachable downstream cannot stall a registration response; past
/// that bound the orchestrator treats the push as failed. There is no
/// retry queue and no idempotency token on this call.
pub struct HttpProfileReplicator {
    client: reqwest::Client,
    sync_url: String,
}

impl HttpProfileReplicator {
    /// Build the replicator from configuration.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ReplicationConfig) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            sync_url: config.sync_url.clone(),
        })
    }
}

#[async_trait]
impl ProfileReplicator for HttpProfileReplicator {
    async fn replicate(&self, record: &ReplicationRecord) -> Result<(), ReplicationError> {
        let response = self
            .client
            .post(&self.sync_url)
            .json(record)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ReplicationError::Timeout
                } else {
                    ReplicationError::Transport(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(ReplicationError::Rejected(response.status().as_u16()));
        }

        tracing::debug!(
            identity_id = record.identity_id,
            "Identity replicated to profile-service"
        );
        Ok(())
    }
}
