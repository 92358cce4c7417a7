#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::{
    mint_access_token, sign, verify, verify_access_token, Claims, Principal, PrincipalId,
    SignError, TokenError,
};
pub use config::ServerConfig;
pub use error::AppError;
pub use extractors::CurrentPrincipal;
pub use middleware::{BearerAuth, RequestTrace, StructuredLogger};
pub use state::{AppState, SecurityConfig};

// Unit tests share the integration-test subscriber.
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    gatekeeper_test_support::logging::init();
}
