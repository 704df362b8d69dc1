//! TOML configuration for the PressAI server.

use std::path::Path;

use serde::Deserialize;

use crate::error::ServerError;

/// Top-level schema for `pressai.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct PressaiConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Audit store backend settings.
    #[serde(default)]
    pub audit: StoreBackendConfig,
    /// Analytics store backend settings.
    #[serde(default)]
    pub analytics: StoreBackendConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl PressaiConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ServerError::Config(format!("cannot read {}: {e}", path.as_ref().display()))
        })?;
        toml::from_str(&raw).map_err(|e| ServerError::Config(e.to_string()))
    }
}

/// HTTP listener settings.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8080
}

/// Settings for a pluggable store backend (audit or analytics).
#[derive(Debug, Deserialize)]
pub struct StoreBackendConfig {
    /// Which backend to use: `"memory"` or `"postgres"`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Connection URL (required for `postgres`).
    pub url: Option<String>,
    /// Table name prefix.
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for StoreBackendConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: None,
            prefix: default_prefix(),
        }
    }
}

fn default_backend() -> String {
    "memory".to_owned()
}

fn default_prefix() -> String {
    "pressai_".to_owned()
}

/// Authentication settings.
///
/// When disabled, all requests run as the system actor with full
/// access; audit entries written in that mode carry no actor id.
#[derive(Debug, Default, Deserialize)]
pub struct AuthConfig {
    /// Whether API-key authentication is enforced.
    #[serde(default)]
    pub enabled: bool,
    /// The API key table.
    #[serde(default)]
    pub api_keys: Vec<ApiKeyConfig>,
}

/// An API key principal.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeyConfig {
    /// Stable user identifier recorded as the audit actor.
    pub user_id: String,
    /// Display name shown in the admin UI.
    pub name: String,
    /// SHA-256 hash of the raw key (lowercase hex).
    pub key_hash: String,
    /// Role: `"owner"`, `"admin"`, `"editor"`, or `"writer"`.
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: PressaiConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.audit.backend, "memory");
        assert_eq!(config.analytics.prefix, "pressai_");
        assert!(!config.auth.enabled);
    }

    #[test]
    fn full_config_parses() {
        let raw = r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [audit]
            backend = "postgres"
            url = "postgres://localhost/pressai"
            prefix = "press_"

            [auth]
            enabled = true

            [[auth.api_keys]]
            user_id = "u-1"
            name = "Ada"
            key_hash = "deadbeef"
            role = "admin"
        "#;
        let config: PressaiConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.audit.backend, "postgres");
        assert_eq!(config.audit.prefix, "press_");
        assert!(config.auth.enabled);
        assert_eq!(config.auth.api_keys.len(), 1);
        assert_eq!(config.auth.api_keys[0].role, "admin");
    }
}
