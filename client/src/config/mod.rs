//! Central module for application-wide configuration settings.
//!
//! Settings are read from `SHOWCASE_`-prefixed environment variables:
//! the backend base URL, request timeout, optional API key, where the
//! session record is kept and the log level.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use showcase_adapters::HttpConnection;

use crate::storage::{FileStorage, MemoryStorage, SessionStorage};

#[derive(Deserialize, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds, login included
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// File holding the session record; kept in memory when unset
    #[serde(default)]
    pub session_file: Option<PathBuf>,

    /// Static key sent as `X-API-Key` on resource requests
    #[serde(default)]
    pub api_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_base_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("SHOWCASE"))
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn http_connection(&self) -> HttpConnection {
        let connection = HttpConnection::new(self.api_base_url.clone(), self.request_timeout());
        match &self.api_key {
            Some(key) => connection.with_api_key(key.clone()),
            None => connection,
        }
    }

    /// Storage medium selected by `session_file`.
    pub fn session_storage(&self) -> Arc<dyn SessionStorage> {
        match &self.session_file {
            Some(path) => Arc::new(FileStorage::new(path.clone())),
            None => Arc::new(MemoryStorage::new()),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("session_file", &self.session_file)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure tests run serially and don't interfere with each other
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "SHOWCASE_API_BASE_URL",
        "SHOWCASE_REQUEST_TIMEOUT_SECS",
        "SHOWCASE_SESSION_FILE",
        "SHOWCASE_API_KEY",
        "SHOWCASE_LOG_LEVEL",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let _lock = TEST_LOCK.lock().unwrap();
        clear_env();

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080/api/v1");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.session_file, None);
        assert_eq!(config.api_key, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_custom_config() {
        let _lock = TEST_LOCK.lock().unwrap();
        clear_env();
        std::env::set_var("SHOWCASE_API_BASE_URL", "https://api.example.test/v2");
        std::env::set_var("SHOWCASE_REQUEST_TIMEOUT_SECS", "3");
        std::env::set_var("SHOWCASE_SESSION_FILE", "/tmp/showcase-session.json");
        std::env::set_var("SHOWCASE_API_KEY", "abc");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_base_url, "https://api.example.test/v2");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(
            config.session_file,
            Some(PathBuf::from("/tmp/showcase-session.json"))
        );

        let connection = config.http_connection();
        assert_eq!(connection.api_key.as_deref(), Some("abc"));
        assert_eq!(connection.timeout, Duration::from_secs(3));
        assert!(!format!("{config:?}").contains("abc"));

        clear_env();
    }
}
