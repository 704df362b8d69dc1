use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entry::AuditEntry;

/// Query parameters for searching audit entries.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditQuery {
    /// Filter by acting user (exact match).
    pub actor_id: Option<String>,
    /// Filter by action label (substring match).
    pub action: Option<String>,
    /// Filter by entity type (exact match).
    pub entity_type: Option<String>,
    /// Only entries created at or after this time.
    pub from: Option<DateTime<Utc>>,
    /// Only entries created at or before this time.
    pub to: Option<DateTime<Utc>>,
    /// Maximum number of entries to return (default 50, max 1000).
    pub limit: Option<u32>,
    /// Number of entries to skip for pagination.
    pub offset: Option<u32>,
}

impl AuditQuery {
    /// Return the effective limit, clamped to 1..=1000, defaulting to 50.
    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(50).clamp(1, 1000)
    }

    /// Return the effective offset, defaulting to 0.
    pub fn effective_offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }
}

/// A paginated page of audit entries, ordered by `created_at` descending.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditPage {
    /// The entries matching the query.
    pub entries: Vec<AuditEntry>,
    /// Total number of entries matching the query (before pagination).
    pub total: u64,
    /// The limit used for this page.
    pub limit: u32,
    /// The offset used for this page.
    pub offset: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        let q = AuditQuery::default();
        assert_eq!(q.effective_limit(), 50);
        assert_eq!(q.effective_offset(), 0);

        let q = AuditQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(q.effective_limit(), 1);

        let q = AuditQuery {
            limit: Some(5000),
            offset: Some(20),
            ..Default::default()
        };
        assert_eq!(q.effective_limit(), 1000);
        assert_eq!(q.effective_offset(), 20);
    }
}
