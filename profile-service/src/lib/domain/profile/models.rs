use auth::Role;
use chrono::DateTime;
use chrono::Utc;

use crate::profile::errors::ProfileError;

/// Local copy of an identity record pushed from identity-service.
///
/// This replica is not the source of truth for any of these fields; it
/// only mirrors what the last sync delivered. `synced_at` records when
/// that delivery happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub identity_id: i64,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub synced_at: DateTime<Utc>,
}

/// Validated command to upsert a replica row from a sync push.
#[derive(Debug, Clone)]
pub struct SyncProfileCommand {
    pub identity_id: i64,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

impl SyncProfileCommand {
    /// Validate the raw sync fields.
    ///
    /// # Errors
    /// * `InvalidRecord` - Blank email or display name, or a non-positive id
    pub fn new(
        identity_id: i64,
        email: String,
        display_name: String,
        role: Role,
    ) -> Result<Self, ProfileError> {
        if identity_id <= 0 {
            return Err(ProfileError::InvalidRecord(format!(
                "identity_id must be positive, got {}",
                identity_id
            )));
        }
        if email.trim().is_empty() {
            return Err(ProfileError::InvalidRecord("email must not be blank".to_string()));
        }
        if display_name.trim().is_empty() {
            return Err(ProfileError::InvalidRecord(
                "display_name must not be blank".to_string(),
            ));
        }

        Ok(Self {
            identity_id,
            email,
            display_name,
            role,
        })
    }

    pub fn into_profile(self, synced_at: DateTime<Utc>) -> Profile {
        Profile {
            identity_id: self.identity_id,
            email: self.email,
            display_name: self.display_name,
            role: self.role,
            synced_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_command_validation() {
        assert!(SyncProfileCommand::new(1, "a@x.com".into(), "Alice".into(), Role::Student).is_ok());
        assert!(SyncProfileCommand::new(0, "a@x.com".into(), "Alice".into(), Role::Student).is_err());
        assert!(SyncProfileCommand::new(1, " ".into(), "Alice".into(), Role::Student).is_err());
        assert!(SyncProfileCommand::new(1, "a@x.com".into(), "".into(), Role::Student).is_err());
    }
}
