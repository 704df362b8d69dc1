use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::action::{AuditAction, EntityType};

/// A single immutable audit entry.
///
/// Written once, after the wrapped operation succeeds; never mutated or
/// deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditEntry {
    /// Unique identifier (UUID v7).
    pub id: String,
    /// The acting user, if any. `None` marks a system-initiated action.
    #[serde(default)]
    pub actor_id: Option<String>,
    /// What happened (`entity.verb` label).
    pub action: AuditAction,
    /// Classification of the affected resource.
    #[serde(default)]
    pub entity_type: Option<EntityType>,
    /// Identifier of the specific affected resource.
    #[serde(default)]
    pub entity_id: Option<String>,
    /// Action-specific context.
    #[serde(default = "empty_details")]
    pub details: serde_json::Value,
    /// Originating client address as seen by the server.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// When the entry was composed. Immutable.
    pub created_at: DateTime<Utc>,
}

fn empty_details() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl AuditEntry {
    /// Create an entry for `action` with a fresh id and the current time.
    /// All optional fields start empty; fill them with struct update or
    /// the `with_*` helpers.
    pub fn new(action: AuditAction) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            actor_id: None,
            action,
            entity_type: None,
            entity_id: None,
            details: empty_details(),
            ip_address: None,
            created_at: Utc::now(),
        }
    }

    /// Set the acting user.
    #[must_use]
    pub fn with_actor(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = Some(actor_id.into());
        self
    }

    /// Set the affected entity.
    #[must_use]
    pub fn with_entity(mut self, entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type);
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Set the action-specific context.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_has_empty_defaults() {
        let entry = AuditEntry::new(AuditAction::new(AuditAction::SETTINGS_UPDATE));
        assert!(entry.actor_id.is_none());
        assert!(entry.entity_type.is_none());
        assert!(entry.entity_id.is_none());
        assert!(entry.ip_address.is_none());
        assert_eq!(entry.details, serde_json::json!({}));
        assert!(!entry.id.is_empty());
    }

    #[test]
    fn missing_optional_fields_deserialize() {
        let json = serde_json::json!({
            "id": "e1",
            "action": "user.invite",
            "created_at": "2026-08-01T12:00:00Z",
        });
        let entry: AuditEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.action.as_str(), "user.invite");
        assert_eq!(entry.details, serde_json::json!({}));
    }

    #[test]
    fn builder_helpers() {
        let entry = AuditEntry::new(AuditAction::new(AuditAction::CONTENT_CREATE))
            .with_actor("u-1")
            .with_entity(EntityType::new(EntityType::CONTENT), "c-9")
            .with_details(serde_json::json!({"title": "Draft"}));
        assert_eq!(entry.actor_id.as_deref(), Some("u-1"));
        assert_eq!(entry.entity_id.as_deref(), Some("c-9"));
        assert_eq!(entry.details["title"], "Draft");
    }
}
