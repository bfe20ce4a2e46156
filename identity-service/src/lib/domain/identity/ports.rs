use async_trait::async_trait;
use auth::IssuedToken;
use auth::SessionClaims;
use auth::TokenError;

use crate::identity::errors::IdentityError;
use crate::identity::errors::ReplicationError;
use crate::identity::models::Identity;
use crate::identity::models::LoginCommand;
use crate::identity::models::LoginOutcome;
use crate::identity::models::NewIdentity;
use crate::identity::models::RegisterCommand;
use crate::identity::models::ReplicationRecord;

/// Port for identity domain service operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new identity and replicate it to profile-service.
    ///
    /// Replication is best-effort: its failure is logged and never fails
    /// the registration.
    ///
    /// # Errors
    /// * `EmailTaken` - An identity with this email already exists
    /// * `PersistenceError` - Storage failure; nothing was persisted
    async fn register(&self, command: RegisterCommand) -> Result<Identity, IdentityError>;

    /// Verify credentials and issue a session token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, identical
    ///   in both cases
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, IdentityError>;

    /// Re-issue a token from an existing valid token.
    ///
    /// # Errors
    /// * `TokenError` - Any verification failure propagates unchanged
    fn refresh(&self, token: &str) -> Result<IssuedToken, TokenError>;

    /// Decode and validate a session token.
    ///
    /// # Errors
    /// * `TokenError` - Missing/malformed/invalid-signature/expired
    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError>;
}

/// Persistence operations for the credential store.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Atomically insert a new identity and return it with the assigned id.
    ///
    /// Uniqueness of the email is enforced by the store itself (unique
    /// constraint), so two concurrent registrations with the same email
    /// cannot both succeed.
    ///
    /// # Errors
    /// * `EmailTaken` - An identity with this email already exists
    /// * `PersistenceError` - Storage failure; the insert is rolled back
    async fn insert(&self, identity: NewIdentity) -> Result<Identity, IdentityError>;

    /// Retrieve an identity by its login email.
    ///
    /// # Errors
    /// * `PersistenceError` - Storage failure
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError>;
}

/// Port for pushing identity records to profile-service.
#[async_trait]
pub trait ProfileReplicator: Send + Sync + 'static {
    /// Push the replication record to the downstream sync endpoint.
    ///
    /// Implementations must bound the call with an explicit timeout so an
    /// unreachable downstream cannot stall registration.
    ///
    /// # Errors
    /// * `Rejected` - Non-2xx acknowledgement
    /// * `Timeout` - Bounded timeout elapsed
    /// * `Transport` - Network-level failure
    async fn replicate(&self, record: &ReplicationRecord) -> Result<(), ReplicationError>;
}
