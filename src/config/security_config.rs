use serde::Deserialize;

use super::defaults;

#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    #[serde(default = "defaults::default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
    #[serde(default = "defaults::default_metrics_allow_private_only")]
    pub metrics_allow_private_only: bool,
    #[serde(default)]
    pub metrics_admin_token: Option<String>,
    #[serde(default = "defaults::default_login_max_failures")]
    pub login_max_failures: u32,
    #[serde(default = "defaults::default_login_lockout_seconds")]
    pub login_lockout_seconds: u64,
    #[serde(default = "defaults::default_login_backoff_base_ms")]
    pub login_backoff_base_ms: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origins: defaults::default_cors_allowed_origins(),
            metrics_allow_private_only: defaults::default_metrics_allow_private_only(),
            metrics_admin_token: None,
            login_max_failures: defaults::default_login_max_failures(),
            login_lockout_seconds: defaults::default_login_lockout_seconds(),
            login_backoff_base_ms: defaults::default_login_backoff_base_ms(),
        }
    }
}
