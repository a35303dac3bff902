//! Listener, environment and request-handling settings.

use serde::{Deserialize, Deserializer};
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// Tracing filter directive; `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Browser origins allowed by CORS, given as one comma-separated value.
    #[serde(default, deserialize_with = "comma_separated")]
    pub cors_origins: Vec<String>,
}

/// Where the service is deployed. Production tightens CORS and secret
/// length checks and switches logs to JSON.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidBindAddress)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.bind_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: Vec::new(),
        }
    }
}

fn comma_separated<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect())
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,course_market=debug,sqlx=warn,tower_http=info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listens_on_all_interfaces_by_default() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(!config.is_production());
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let config: ServerConfig = serde_json::from_value(json!({
            "cors_origins": "https://shop.example.com, ,http://localhost:5173"
        }))
        .unwrap();
        assert_eq!(
            config.cors_origins,
            vec!["https://shop.example.com", "http://localhost:5173"]
        );
    }

    #[test]
    fn environment_is_lowercase() {
        let config: ServerConfig =
            serde_json::from_value(json!({ "environment": "production" })).unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn rejects_bad_listener_settings() {
        let zero_port = ServerConfig { port: 0, ..Default::default() };
        assert!(matches!(zero_port.validate(), Err(ValidationError::InvalidPort)));

        let garbage_host = ServerConfig { host: "not a host".into(), ..Default::default() };
        assert!(matches!(
            garbage_host.validate(),
            Err(ValidationError::InvalidBindAddress)
        ));

        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = ServerConfig { request_timeout_secs: secs, ..Default::default() };
            assert!(matches!(config.validate(), Err(ValidationError::InvalidTimeout)));
        }
    }
}
