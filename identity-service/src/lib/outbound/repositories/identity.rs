use async_trait::async_trait;
use auth::Role;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::identity::errors::IdentityError;
use crate::identity::models::DisplayName;
use crate::identity::models::EmailAddress;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::models::NewIdentity;
use crate::identity::ports::IdentityStore;

/// PostgreSQL implementation of the credential store.
///
/// Email uniqueness is enforced by the `identities_email_key` constraint,
/// so the existence check and the insert are one atomic operation and two
/// concurrent registrations with the same email cannot both succeed.
pub struct PostgresIdentityStore {
    pool: PgPool,
}

impl PostgresIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn identity_from_row(row: &PgRow) -> Result<Identity, IdentityError> {
        let role: String = row
            .try_get("role")
            .map_err(|e| IdentityError::PersistenceError(e.to_string()))?;
        let email: String = row
            .try_get("email")
            .map_err(|e| IdentityError::PersistenceError(e.to_string()))?;
        let display_name: String = row
            .try_get("display_name")
            .map_err(|e| IdentityError::PersistenceError(e.to_string()))?;

        Ok(Identity {
            id: IdentityId(
                row.try_get("id")
                    .map_err(|e| IdentityError::PersistenceError(e.to_string()))?,
            ),
            email: EmailAddress::new(email)?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| IdentityError::PersistenceError(e.to_string()))?,
            display_name: DisplayName::new(display_name)?,
            role: role.parse::<Role>()?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| IdentityError::PersistenceError(e.to_string()))?,
        })
    }
}

#[async_trait]
impl IdentityStore for PostgresIdentityStore {
    async fn insert(&self, identity: NewIdentity) -> Result<Identity, IdentityError> {
        let row = sqlx::query(
            r#"
            INSERT INTO identities (email, password_hash, display_name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at
            "#,
        )
        .bind(identity.email.as_str())
        .bind(&identity.password_hash)
        .bind(identity.display_name.as_str())
        .bind(identity.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return IdentityError::EmailTaken(identity.email.as_str().to_string());
                }
            }
            IdentityError::PersistenceError(e.to_string())
        })?;

        Ok(Identity {
            id: IdentityId(
                row.try_get("id")
                    .map_err(|e| IdentityError::PersistenceError(e.to_string()))?,
            ),
            email: identity.email,
            password_hash: identity.password_hash,
            display_name: identity.display_name,
            role: identity.role,
            created_at: row
                .try_get("created_at")
                .map_err(|e| IdentityError::PersistenceError(e.to_string()))?,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, display_name, role, created_at
            FROM identities
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::PersistenceError(e.to_string()))?;

        row.as_ref().map(Self::identity_from_row).transpose()
    }
}
