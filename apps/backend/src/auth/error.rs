use thiserror::Error;

/// Why a presented token was refused by the codec.
///
/// Callers facing the network collapse every variant to one
/// unauthenticated response; the variant itself is for logs only.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
}

impl TokenError {
    /// Stable identifier used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired => "expired",
        }
    }
}

/// Contract violations detected while signing.
#[derive(Error, Debug)]
pub enum SignError {
    #[error("token lifetime must be at least one second")]
    NonPositiveLifetime,
    #[error("signing secret must not be empty")]
    InvalidKey,
    #[error("token expiry overflows the clock range")]
    ExpiryOverflow,
    #[error("claims are not serializable: {0}")]
    Serialize(#[from] serde_json::Error),
}
