use super::security_config::SecurityConfig;

/// Application state shared with every worker through `web::Data`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Token signing settings
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(security: SecurityConfig) -> Self {
        Self { security }
    }
}
