use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;
use identity_service::domain::identity::errors::IdentityError;
use identity_service::domain::identity::errors::ReplicationError;
use identity_service::domain::identity::models::Identity;
use identity_service::domain::identity::models::IdentityId;
use identity_service::domain::identity::models::NewIdentity;
use identity_service::domain::identity::models::ReplicationRecord;
use identity_service::domain::identity::ports::IdentityStore;
use identity_service::domain::identity::ports::ProfileReplicator;
use identity_service::domain::identity::service::IdentityService;
use identity_service::inbound::http::router::create_router;

pub const TEST_SECRET: &[u8] = b"integration_test_secret_32_bytes!!";

/// Test application that serves the real router on a random port.
///
/// Backed by an in-memory credential store and a recording replicator so
/// the suite needs no database and no second service.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub replications: Arc<Mutex<Vec<ReplicationRecord>>>,
}

/// In-memory credential store with the same atomic check-and-insert
/// contract as the Postgres implementation.
pub struct InMemoryIdentityStore {
    identities: Mutex<Vec<Identity>>,
    next_id: AtomicI64,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self {
            identities: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn insert(&self, identity: NewIdentity) -> Result<Identity, IdentityError> {
        let mut identities = self.identities.lock().unwrap();

        if identities
            .iter()
            .any(|existing| existing.email.as_str() == identity.email.as_str())
        {
            return Err(IdentityError::EmailTaken(
                identity.email.as_str().to_string(),
            ));
        }

        let stored = Identity {
            id: IdentityId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            email: identity.email,
            password_hash: identity.password_hash,
            display_name: identity.display_name,
            role: identity.role,
            created_at: Utc::now(),
        };
        identities.push(stored.clone());

        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        let identities = self.identities.lock().unwrap();
        Ok(identities
            .iter()
            .find(|identity| identity.email.as_str() == email)
            .cloned())
    }
}

/// Recording replicator; optionally fails every push to exercise the
/// best-effort contract.
pub struct StubReplicator {
    records: Arc<Mutex<Vec<ReplicationRecord>>>,
    fail: bool,
}

#[async_trait]
impl ProfileReplicator for StubReplicator {
    async fn replicate(&self, record: &ReplicationRecord) -> Result<(), ReplicationError> {
        if self.fail {
            return Err(ReplicationError::Transport(
                "connection refused".to_string(),
            ));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

impl TestApp {
    /// Spawn the application with a healthy replication target.
    pub async fn spawn() -> Self {
        Self::spawn_inner(false).await
    }

    /// Spawn the application with a replication target that always fails.
    pub async fn spawn_with_failing_replication() -> Self {
        Self::spawn_inner(true).await
    }

    async fn spawn_inner(fail_replication: bool) -> Self {
        let replications = Arc::new(Mutex::new(Vec::new()));

        let store = Arc::new(InMemoryIdentityStore::new());
        let replicator = Arc::new(StubReplicator {
            records: Arc::clone(&replications),
            fail: fail_replication,
        });
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));

        let identity_service = Arc::new(IdentityService::new(
            store,
            replicator,
            authenticator,
            Duration::minutes(30),
        ));

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let application = create_router(identity_service);
        tokio::spawn(async move {
            axum::serve(listener, application)
                .await
                .expect("Server failed");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            replications,
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Register a user and return the response.
    pub async fn register(
        &self,
        email: &str,
        display_name: &str,
        role: &str,
        password: &str,
    ) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&serde_json::json!({
                "email": email,
                "display_name": display_name,
                "role": role,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Login and return the response.
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Login and extract the token, asserting success.
    pub async fn login_token(&self, email: &str, password: &str) -> String {
        let response = self.login(email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token in login response")
            .to_string()
    }
}
