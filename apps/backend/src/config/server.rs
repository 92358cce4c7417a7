//! Process configuration loaded once from environment variables at startup.

use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::state::security_config::{SecurityConfig, DEFAULT_TOKEN_TTL};

pub const JWT_SECRET_VAR: &str = "APP_JWT_SECRET";
pub const TOKEN_TTL_VAR: &str = "APP_TOKEN_TTL_SECS";
pub const HOST_VAR: &str = "BACKEND_HOST";
pub const PORT_VAR: &str = "BACKEND_PORT";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub security: SecurityConfig,
}

impl ServerConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(JWT_SECRET_VAR)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::config(format!("{JWT_SECRET_VAR} must be set and non-empty")))?;

        let token_ttl = match lookup(TOKEN_TTL_VAR) {
            None => DEFAULT_TOKEN_TTL,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(AppError::config(format!(
                        "{TOKEN_TTL_VAR} must be a positive number of seconds, got '{raw}'"
                    )))
                }
            },
        };

        let host = lookup(HOST_VAR).unwrap_or_else(|| "0.0.0.0".to_string());

        let port_str = lookup(PORT_VAR).unwrap_or_else(|| "3001".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "{PORT_VAR} must be a valid port number, got '{port_str}'"
            ))
        })?;

        Ok(Self {
            host,
            port,
            security: SecurityConfig::new(secret.into_bytes()).with_token_ttl(token_ttl),
        })
    }
}
