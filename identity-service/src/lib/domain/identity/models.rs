use std::fmt;
use std::str::FromStr;

use auth::IssuedToken;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::identity::errors::DisplayNameError;
use crate::identity::errors::EmailError;

/// Identity aggregate entity.
///
/// The authoritative stored representation of a registered principal.
/// The password hash is opaque and never leaves the service.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: IdentityId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub display_name: DisplayName,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Identity unique identifier, assigned by the credential store on insert
/// and immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityId(pub i64);

impl IdentityId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// The login identifier, unique within the credential store (case-sensitive
/// as stored). Validated with an RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Mutable, not security-relevant. Must be non-blank and at most 64
/// characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LENGTH: usize = 64;

    /// Create a new validated display name.
    ///
    /// # Errors
    /// * `Empty` - Name is blank after trimming
    /// * `TooLong` - Name exceeds 64 characters
    pub fn new(name: String) -> Result<Self, DisplayNameError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DisplayNameError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(DisplayNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: trimmed.chars().count(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity record as handed to the credential store, before an id exists.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub email: EmailAddress,
    pub password_hash: String,
    pub display_name: DisplayName,
    pub role: Role,
}

/// Command to register a new identity with validated fields.
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub display_name: DisplayName,
    pub role: Role,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(email: EmailAddress, display_name: DisplayName, role: Role, password: String) -> Self {
        Self {
            email,
            display_name,
            role,
            password,
        }
    }
}

/// Command to log in.
///
/// The email is deliberately kept as a raw string: a syntactically invalid
/// email must produce the same failure as a wrong password, so login never
/// runs boundary validation that could leak which inputs are plausible.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Redacted identity summary returned from login. Never carries the hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySummary {
    pub id: IdentityId,
    pub display_name: String,
    pub role: Role,
}

impl From<&Identity> for IdentitySummary {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            display_name: identity.display_name.as_str().to_string(),
            role: identity.role,
        }
    }
}

/// Result of a successful login: the bearer credential plus the summary.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: IssuedToken,
    pub identity: IdentitySummary,
}

/// Subset of an identity pushed to profile-service after registration.
///
/// A one-way copy; the receiving side may elaborate it locally but is not
/// the source of truth for these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationRecord {
    pub identity_id: i64,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

impl From<&Identity> for ReplicationRecord {
    fn from(identity: &Identity) -> Self {
        Self {
            identity_id: identity.id.as_i64(),
            email: identity.email.as_str().to_string(),
            display_name: identity.display_name.as_str().to_string(),
            role: identity.role,
        }
    }
}
