use thiserror::Error;

/// Error type for session token operations.
///
/// Decode failures are kept distinguishable so callers can map a missing
/// credential, a garbled token, a bad signature, and a passive expiry to
/// different externally observable outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("No bearer credential presented")]
    Missing,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}
