use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Coarse authorization role carried in every session token.
///
/// Copied from the identity record at issuance time. A role change after
/// issuance is not reflected in tokens already in circulation; it takes
/// effect at the next login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Professional,
    Admin,
    Student,
    Patient,
}

/// Error for role parsing failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct InvalidRole(pub String);

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Role::Client),
            "professional" => Ok(Role::Professional),
            "admin" => Ok(Role::Admin),
            "student" => Ok(Role::Student),
            "patient" => Ok(Role::Patient),
            other => Err(InvalidRole(other.to_string())),
        }
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Professional => "professional",
            Role::Admin => "admin",
            Role::Student => "student",
            Role::Patient => "patient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claim set embedded in every issued session token.
///
/// Created once per login or refresh, serialized into the token, handed to
/// the client, and never persisted server-side. The only destruction a
/// token has is passive expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the identity's email (stable correlation key)
    pub sub: String,

    /// Identity record id, so downstream services can key lookups by id
    pub identity_id: i64,

    /// Role snapshot taken at issuance
    pub role: Role,

    /// Display name snapshot taken at issuance
    pub display_name: String,

    /// Expiration time (Unix timestamp); invalid from this instant onward
    pub exp: i64,
}

impl SessionClaims {
    /// Build claims for a fresh login with `exp = now + ttl`.
    pub fn issue(
        subject: impl Into<String>,
        identity_id: i64,
        role: Role,
        display_name: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: subject.into(),
            identity_id,
            role,
            display_name: display_name.into(),
            exp: (Utc::now() + ttl).timestamp(),
        }
    }

    /// Carry every claim forward unchanged with a freshly computed `exp`.
    ///
    /// This is the refresh contract: the session is extended, not
    /// re-authorized, so nothing is re-read from storage.
    pub fn renew(&self, ttl: Duration) -> Self {
        Self {
            exp: (Utc::now() + ttl).timestamp(),
            ..self.clone()
        }
    }

    /// Absolute expiry instant.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}
