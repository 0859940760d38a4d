use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the accessibility-guide backend.
    pub base_url: String,
    /// Per-request timeout in seconds; a request past this fails as a
    /// network error.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the durable session files (auth_token, auth_user).
    pub config_dir: PathBuf,
}

/// Default production host, used when A11Y_API_URL is not set.
pub const DEFAULT_API_URL: &str = "https://accessibility-guide-backend.onrender.com";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

impl AppConfig {
    pub fn from_env() -> Self {
        let base_url = env::var("A11Y_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = env::var("A11Y_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api: ApiConfig { base_url, timeout_secs },
            storage: StorageConfig { config_dir: default_config_dir() },
        }
    }
}

/// Config directory for durable client state. Overridable for tests and
/// sandboxed environments via A11Y_CLI_CONFIG_DIR.
fn default_config_dir() -> PathBuf {
    if let Ok(custom_dir) = env::var("A11Y_CLI_CONFIG_DIR") {
        return PathBuf::from(custom_dir);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config").join("a11y-guide").join("cli")
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_api_settings() {
        // Builds from a clean environment view; env overrides are additive
        let config = AppConfig::from_env();
        assert!(!config.api.base_url.ends_with('/'));
        assert!(config.api.timeout_secs > 0);
    }

    #[test]
    fn default_base_url_is_production_host() {
        if env::var("A11Y_API_URL").is_err() {
            let config = AppConfig::from_env();
            assert_eq!(config.api.base_url, DEFAULT_API_URL);
        }
    }
}
