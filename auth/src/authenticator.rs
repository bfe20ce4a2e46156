use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::password::PasswordHasher;
use crate::token::SessionClaims;
use crate::token::TokenCodec;
use crate::token::TokenError;

/// Authentication coordinator combining password verification and token
/// issuance.
///
/// One instance per process, constructed with the deployment's shared
/// secret. Services that only verify tokens use the same type; the unused
/// issuing side is harmless.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    codec: TokenCodec,
}

/// A freshly issued bearer credential.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact signed token
    pub token: String,

    /// Scheme marker for the Authorization header
    pub token_type: &'static str,

    /// Absolute expiry of the embedded claims
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    /// Wrong password, deliberately indistinguishable from an unknown user
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator from the shared signing secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            codec: TokenCodec::new(secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, crate::PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token.
    ///
    /// A mismatch (including a digest that fails to parse) yields
    /// `InvalidCredentials`; the caller maps an unknown user to the same
    /// error so registered emails cannot be enumerated.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Token(EncodingFailed)` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_digest: &str,
        claims: &SessionClaims,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_digest) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let token = self.codec.encode(claims)?;

        Ok(IssuedToken {
            token,
            token_type: "Bearer",
            expires_at: claims.expires_at(),
        })
    }

    /// Decode and validate a session token.
    ///
    /// # Errors
    /// * `TokenError` - Missing/malformed/invalid-signature/expired
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.codec.decode(token)
    }

    /// Re-issue a token from an existing valid one.
    ///
    /// The presented token must still pass signature and expiry checks; an
    /// already-expired token cannot be refreshed. Claims are carried
    /// forward from the token itself, never re-read from storage.
    ///
    /// # Errors
    /// * `TokenError` - Any verification failure propagates unchanged
    pub fn refresh(&self, token: &str, ttl: Duration) -> Result<IssuedToken, TokenError> {
        let claims = self.codec.decode(token)?;
        let renewed = claims.renew(ttl);
        let token = self.codec.encode(&renewed)?;

        Ok(IssuedToken {
            token,
            token_type: "Bearer",
            expires_at: renewed.expires_at(),
        })
    }
}
