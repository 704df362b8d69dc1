//! API-key authentication and role resolution.
//!
//! PressAI proper delegates authentication to a hosted provider; this
//! server models the resolved session as an [`ActorIdentity`] request
//! extension so downstream handlers and the audit recorder can read it
//! without knowing where it came from.

pub mod middleware;
pub mod role;

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::config::ApiKeyConfig;
use role::Role;

/// The authenticated principal attached to each request.
#[derive(Debug, Clone)]
pub struct ActorIdentity {
    /// Stable user identifier; `None` for the system actor (auth
    /// disabled or internal invocation).
    pub user_id: Option<String>,
    /// Display name.
    pub name: String,
    /// Role controlling endpoint access.
    pub role: Role,
}

impl ActorIdentity {
    /// The identity used when authentication is disabled. Full access,
    /// no actor attribution.
    pub fn system() -> Self {
        Self {
            user_id: None,
            name: "system".to_owned(),
            role: Role::Owner,
        }
    }
}

/// An entry in the API key lookup table.
#[derive(Debug, Clone)]
struct ApiKeyEntry {
    user_id: String,
    name: String,
    role: Role,
}

/// Resolves raw API keys to identities via a `sha256_hex(raw) -> entry`
/// table built from the config file.
pub struct AuthProvider {
    keys: HashMap<String, ApiKeyEntry>,
    names: HashMap<String, String>,
}

impl AuthProvider {
    /// Build the lookup tables from the configured API keys. Keys with
    /// an unknown role fall back to `writer`.
    pub fn new(configs: &[ApiKeyConfig]) -> Self {
        let mut keys = HashMap::new();
        let mut names = HashMap::new();
        for cfg in configs {
            let role = Role::from_str_loose(&cfg.role).unwrap_or(Role::Writer);
            keys.insert(
                cfg.key_hash.clone(),
                ApiKeyEntry {
                    user_id: cfg.user_id.clone(),
                    name: cfg.name.clone(),
                    role,
                },
            );
            names.insert(cfg.user_id.clone(), cfg.name.clone());
        }
        Self { keys, names }
    }

    /// Look up a raw API key and return the matching identity.
    pub fn authenticate(&self, raw_key: &str) -> Option<ActorIdentity> {
        let hash = hash_api_key(raw_key);
        self.keys.get(&hash).map(|entry| ActorIdentity {
            user_id: Some(entry.user_id.clone()),
            name: entry.name.clone(),
            role: entry.role,
        })
    }

    /// Resolve a user id to its display name.
    pub fn display_name(&self, user_id: &str) -> Option<&str> {
        self.names.get(user_id).map(String::as_str)
    }
}

/// Hash a raw API key to the lookup format (lowercase hex SHA-256).
pub fn hash_api_key(raw_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_key.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> AuthProvider {
        AuthProvider::new(&[ApiKeyConfig {
            user_id: "u-1".to_owned(),
            name: "Ada".to_owned(),
            key_hash: hash_api_key("secret-key"),
            role: "admin".to_owned(),
        }])
    }

    #[test]
    fn valid_key_resolves_identity() {
        let identity = provider().authenticate("secret-key").unwrap();
        assert_eq!(identity.user_id.as_deref(), Some("u-1"));
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn wrong_key_is_rejected() {
        assert!(provider().authenticate("nope").is_none());
    }

    #[test]
    fn display_name_lookup() {
        let p = provider();
        assert_eq!(p.display_name("u-1"), Some("Ada"));
        assert_eq!(p.display_name("u-2"), None);
    }

    #[test]
    fn unknown_role_falls_back_to_writer() {
        let p = AuthProvider::new(&[ApiKeyConfig {
            user_id: "u-9".to_owned(),
            name: "Eve".to_owned(),
            key_hash: hash_api_key("k"),
            role: "superuser".to_owned(),
        }]);
        assert_eq!(p.authenticate("k").unwrap().role, Role::Writer);
    }
}
