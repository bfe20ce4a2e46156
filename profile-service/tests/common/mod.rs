use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Role;
use auth::SessionClaims;
use auth::TokenCodec;
use chrono::Duration;
use profile_service::domain::profile::errors::ProfileError;
use profile_service::domain::profile::models::Profile;
use profile_service::domain::profile::ports::ReplicaRepository;
use profile_service::domain::profile::service::ProfileService;
use profile_service::inbound::http::router::create_router;

pub const TEST_SECRET: &[u8] = b"integration_test_secret_32_bytes!!";

/// Test application that serves the real router on a random port, backed
/// by an in-memory replica so the suite needs no database.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

/// In-memory replica keyed by identity id, mirroring the upsert semantics
/// of the Postgres implementation.
pub struct InMemoryReplicaRepository {
    profiles: Mutex<BTreeMap<i64, Profile>>,
}

impl InMemoryReplicaRepository {
    pub fn new() -> Self {
        Self {
            profiles: Mutex::new(BTreeMap::new()),
        }
    }
}

#[async_trait]
impl ReplicaRepository for InMemoryReplicaRepository {
    async fn upsert(&self, profile: Profile) -> Result<(), ProfileError> {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.identity_id, profile);
        Ok(())
    }

    async fn find(&self, identity_id: i64) -> Result<Option<Profile>, ProfileError> {
        Ok(self.profiles.lock().unwrap().get(&identity_id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Profile>, ProfileError> {
        Ok(self.profiles.lock().unwrap().values().cloned().collect())
    }
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let repository = Arc::new(InMemoryReplicaRepository::new());
        let profile_service = Arc::new(ProfileService::new(repository));
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let application = create_router(profile_service, authenticator);
        tokio::spawn(async move {
            axum::serve(listener, application)
                .await
                .expect("Server failed");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Push a replica record the way identity-service does.
    pub async fn sync(
        &self,
        identity_id: i64,
        email: &str,
        display_name: &str,
        role: &str,
    ) -> reqwest::Response {
        self.post("/internal/profiles/sync")
            .json(&serde_json::json!({
                "identity_id": identity_id,
                "email": email,
                "display_name": display_name,
                "role": role,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Mint a token the way identity-service would, with the shared secret.
    pub fn token_for(&self, identity_id: i64, email: &str, role: Role) -> String {
        let claims = SessionClaims::issue(email, identity_id, role, "Test", Duration::minutes(30));
        TokenCodec::new(TEST_SECRET)
            .encode(&claims)
            .expect("Failed to encode test token")
    }
}
