//! Identity core authentication library
//!
//! Provides the shared authentication infrastructure for the services in
//! this workspace:
//! - Password hashing (Argon2id)
//! - Session token encoding and validation (HS256 JWT)
//! - Authentication coordination (login, verify, refresh)
//!
//! Every service that verifies tokens constructs an [`Authenticator`] with
//! the same secret, injected from configuration at startup. The secret is
//! never read from ambient state, so tests can run with distinct secrets
//! without leaking between each other.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Role, SessionClaims, TokenCodec};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = SessionClaims::issue("a@x.com", 1, Role::Student, "Alice", Duration::minutes(30));
//! let token = codec.encode(&claims).unwrap();
//! let decoded = codec.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "a@x.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Role, SessionClaims};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let digest = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a token
//! let claims = SessionClaims::issue("a@x.com", 1, Role::Student, "Alice", Duration::minutes(30));
//! let issued = auth.authenticate("password123", &digest, &claims).unwrap();
//!
//! // Validate the token
//! let decoded = auth.verify(&issued.token).unwrap();
//! assert_eq!(decoded.identity_id, 1);
//!
//! // Extend the session without re-presenting the password
//! let renewed = auth.refresh(&issued.token, Duration::minutes(30)).unwrap();
//! assert!(!renewed.token.is_empty());
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::InvalidRole;
pub use token::Role;
pub use token::SessionClaims;
pub use token::TokenCodec;
pub use token::TokenError;
