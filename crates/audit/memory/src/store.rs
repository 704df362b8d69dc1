use async_trait::async_trait;
use dashmap::DashMap;

use pressai_audit::entry::AuditEntry;
use pressai_audit::error::AuditError;
use pressai_audit::query::{AuditPage, AuditQuery};
use pressai_audit::store::AuditStore;

/// In-memory audit store using `DashMap`. Suitable for development and
/// testing.
pub struct MemoryAuditStore {
    entries: DashMap<String, AuditEntry>,
}

impl MemoryAuditStore {
    /// Create a new empty in-memory audit store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl Default for MemoryAuditStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn append(&self, entry: AuditEntry) -> Result<String, AuditError> {
        let id = entry.id.clone();
        self.entries.insert(id.clone(), entry);
        Ok(id)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<AuditEntry>, AuditError> {
        Ok(self.entries.get(id).map(|e| e.value().clone()))
    }

    async fn query(&self, query: &AuditQuery) -> Result<AuditPage, AuditError> {
        let limit = query.effective_limit();
        let offset = query.effective_offset();

        let mut matching: Vec<AuditEntry> = self
            .entries
            .iter()
            .filter_map(|item| {
                let entry = item.value();
                if let Some(ref actor) = query.actor_id {
                    if entry.actor_id.as_deref() != Some(actor.as_str()) {
                        return None;
                    }
                }
                if let Some(ref action) = query.action {
                    if !entry.action.as_str().contains(action.as_str()) {
                        return None;
                    }
                }
                if let Some(ref et) = query.entity_type {
                    if entry.entity_type.as_ref().map(|e| e.as_str()) != Some(et.as_str()) {
                        return None;
                    }
                }
                if let Some(ref from) = query.from {
                    if entry.created_at < *from {
                        return None;
                    }
                }
                if let Some(ref to) = query.to {
                    if entry.created_at > *to {
                        return None;
                    }
                }
                Some(entry.clone())
            })
            .collect();

        // Sort by created_at descending.
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let entries: Vec<AuditEntry> = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();

        Ok(AuditPage {
            entries,
            total,
            limit,
            offset,
        })
    }
}
