use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The kind of action an audit entry records.
///
/// Actions follow an `entity.verb` convention (e.g. `organization.update`).
/// The associated constants cover the vocabulary the admin UI knows how to
/// render, but the type is an open string: feature modules are free to
/// record custom actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AuditAction(String);

impl AuditAction {
    pub const USER_INVITE: &'static str = "user.invite";
    pub const USER_UPDATE: &'static str = "user.update";
    pub const USER_REMOVE: &'static str = "user.remove";
    pub const ORGANIZATION_UPDATE: &'static str = "organization.update";
    pub const CONTENT_CREATE: &'static str = "content.create";
    pub const CONTENT_PUBLISH: &'static str = "content.publish";
    pub const API_KEY_CREATE: &'static str = "api_key.create";
    pub const API_KEY_REVOKE: &'static str = "api_key.revoke";
    pub const SETTINGS_UPDATE: &'static str = "settings.update";

    /// Create an action label.
    pub fn new(action: impl Into<String>) -> Self {
        Self(action.into())
    }

    /// The raw label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AuditAction {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classification of the resource an audit entry affected.
///
/// Open string for the same reason as [`AuditAction`]: the constants are
/// the conventional set, arbitrary values are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct EntityType(String);

impl EntityType {
    pub const USER: &'static str = "user";
    pub const ORGANIZATION: &'static str = "organization";
    pub const CONTENT: &'static str = "content";
    pub const API_KEY: &'static str = "api_key";
    pub const SETTINGS: &'static str = "settings";

    /// Create an entity type label.
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self(entity_type.into())
    }

    /// The raw label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityType {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_accepts_custom_values() {
        let action = AuditAction::new("wordpress.sync");
        assert_eq!(action.as_str(), "wordpress.sync");
    }

    #[test]
    fn action_serializes_as_bare_string() {
        let action = AuditAction::new(AuditAction::ORGANIZATION_UPDATE);
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, "\"organization.update\"");
    }

    #[test]
    fn entity_type_round_trips() {
        let et: EntityType = serde_json::from_str("\"api_key\"").unwrap();
        assert_eq!(et.as_str(), EntityType::API_KEY);
    }
}
