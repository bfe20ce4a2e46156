use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::IssuedToken;
use auth::SessionClaims;
use auth::TokenError;
use chrono::Duration;

use crate::identity::errors::IdentityError;
use crate::identity::models::Identity;
use crate::identity::models::IdentitySummary;
use crate::identity::models::LoginCommand;
use crate::identity::models::LoginOutcome;
use crate::identity::models::NewIdentity;
use crate::identity::models::RegisterCommand;
use crate::identity::models::ReplicationRecord;
use crate::identity::ports::IdentityServicePort;
use crate::identity::ports::IdentityStore;
use crate::identity::ports::ProfileReplicator;

/// Domain service implementation for identity operations.
///
/// Concrete implementation of IdentityServicePort with dependency injection.
pub struct IdentityService<S, R>
where
    S: IdentityStore,
    R: ProfileReplicator,
{
    store: Arc<S>,
    replicator: Arc<R>,
    authenticator: Arc<Authenticator>,
    token_ttl: Duration,
}

impl<S, R> IdentityService<S, R>
where
    S: IdentityStore,
    R: ProfileReplicator,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential store implementation
    /// * `replicator` - Profile sync implementation
    /// * `authenticator` - Shared-secret password/token coordinator
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(
        store: Arc<S>,
        replicator: Arc<R>,
        authenticator: Arc<Authenticator>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            store,
            replicator,
            authenticator,
            token_ttl,
        }
    }
}

#[async_trait]
impl<S, R> IdentityServicePort for IdentityService<S, R>
where
    S: IdentityStore,
    R: ProfileReplicator,
{
    async fn register(&self, command: RegisterCommand) -> Result<Identity, IdentityError> {
        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| IdentityError::Unknown(format!("Password hashing failed: {}", e)))?;

        // Check-and-insert is a single atomic operation in the store; a
        // concurrent duplicate surfaces as EmailTaken from the constraint.
        let identity = self
            .store
            .insert(NewIdentity {
                email: command.email,
                password_hash,
                display_name: command.display_name,
                role: command.role,
            })
            .await?;

        // Best-effort secondary effect: a replication failure leaves the
        // two services divergent until corrected out-of-band. The log line
        // below is the reconciliation hook; the registration still succeeds.
        let record = ReplicationRecord::from(&identity);
        if let Err(e) = self.replicator.replicate(&record).await {
            tracing::error!(
                identity_id = identity.id.as_i64(),
                email = %identity.email,
                pending_reconciliation = true,
                error = %e,
                "Profile replication failed, identity awaits out-of-band sync"
            );
        }

        Ok(identity)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, IdentityError> {
        // Unknown email and wrong password must be indistinguishable
        let identity = self
            .store
            .find_by_email(&command.email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        let claims = SessionClaims::issue(
            identity.email.as_str(),
            identity.id.as_i64(),
            identity.role,
            identity.display_name.as_str(),
            self.token_ttl,
        );

        let issued = self
            .authenticator
            .authenticate(&command.password, &identity.password_hash, &claims)
            .map_err(|e| match e {
                auth::AuthenticationError::InvalidCredentials => IdentityError::InvalidCredentials,
                auth::AuthenticationError::Token(err) => IdentityError::Token(err),
            })?;

        Ok(LoginOutcome {
            token: issued,
            identity: IdentitySummary::from(&identity),
        })
    }

    fn refresh(&self, token: &str) -> Result<IssuedToken, TokenError> {
        self.authenticator.refresh(token, self.token_ttl)
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.authenticator.verify(token)
    }
}
