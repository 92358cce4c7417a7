use std::time::SystemTime;

use super::claims::{Claims, PrincipalId};
use super::codec::{sign_at, verify};
use super::error::TokenError;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Mint an access token naming `principal`, valid for the configured TTL.
///
/// This is what a login handler calls once it has checked the caller's
/// credentials.
pub fn mint_access_token(
    principal: &PrincipalId,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    sign_at(
        principal.to_claims(),
        &security.jwt_secret,
        security.token_ttl,
        now,
    )
    .map_err(|e| AppError::internal(format!("Failed to sign access token: {e}")))
}

/// Verify an access token against the configured secret and the wall clock.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    verify(token, &security.jwt_secret)
}
