use async_trait::async_trait;
use auth::Role;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::profile::errors::ProfileError;
use crate::profile::models::Profile;
use crate::profile::ports::ReplicaRepository;

/// PostgreSQL implementation of ReplicaRepository.
///
/// Stores the denormalized identity data pushed from identity-service in a
/// local replica table, keyed by the upstream identity id so re-delivered
/// records overwrite instead of duplicating.
pub struct PostgresReplicaRepository {
    pool: PgPool,
}

impl PostgresReplicaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn profile_from_row(row: &PgRow) -> Result<Profile, ProfileError> {
        let role: String = row
            .try_get("role")
            .map_err(|e| ProfileError::PersistenceError(e.to_string()))?;
        let role = role
            .parse::<Role>()
            .map_err(|e| ProfileError::InvalidRecord(e.to_string()))?;

        Ok(Profile {
            identity_id: row
                .try_get("identity_id")
                .map_err(|e| ProfileError::PersistenceError(e.to_string()))?,
            email: row
                .try_get("email")
                .map_err(|e| ProfileError::PersistenceError(e.to_string()))?,
            display_name: row
                .try_get("display_name")
                .map_err(|e| ProfileError::PersistenceError(e.to_string()))?,
            role,
            synced_at: row
                .try_get("synced_at")
                .map_err(|e| ProfileError::PersistenceError(e.to_string()))?,
        })
    }
}

#[async_trait]
impl ReplicaRepository for PostgresReplicaRepository {
    async fn upsert(&self, profile: Profile) -> Result<(), ProfileError> {
        sqlx::query(
            r#"
            INSERT INTO identity_replica (identity_id, email, display_name, role, synced_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (identity_id)
            DO UPDATE SET
                email = EXCLUDED.email,
                display_name = EXCLUDED.display_name,
                role = EXCLUDED.role,
                synced_at = EXCLUDED.synced_at
            "#,
        )
        .bind(profile.identity_id)
        .bind(&profile.email)
        .bind(&profile.display_name)
        .bind(profile.role.as_str())
        .bind(profile.synced_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ProfileError::PersistenceError(e.to_string()))?;

        tracing::debug!(
            identity_id = profile.identity_id,
            "Identity upserted in replica"
        );
        Ok(())
    }

    async fn find(&self, identity_id: i64) -> Result<Option<Profile>, ProfileError> {
        let row = sqlx::query(
            r#"
            SELECT identity_id, email, display_name, role, synced_at
            FROM identity_replica
            WHERE identity_id = $1
            "#,
        )
        .bind(identity_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProfileError::PersistenceError(e.to_string()))?;

        row.as_ref().map(Self::profile_from_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Profile>, ProfileError> {
        let rows = sqlx::query(
            r#"
            SELECT identity_id, email, display_name, role, synced_at
            FROM identity_replica
            ORDER BY identity_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProfileError::PersistenceError(e.to_string()))?;

        rows.iter().map(Self::profile_from_row).collect()
    }
}
