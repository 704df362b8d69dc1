use async_trait::async_trait;

use crate::entry::AuditEntry;
use crate::error::AuditError;
use crate::query::{AuditPage, AuditQuery};

/// Trait for audit entry storage backends.
///
/// Implementations must be `Send + Sync` to be shared across async tasks.
/// The trait is append-only: entries can never be updated or deleted
/// through it.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Persist an audit entry and return its id.
    async fn append(&self, entry: AuditEntry) -> Result<String, AuditError>;

    /// Retrieve an audit entry by its unique ID.
    async fn get_by_id(&self, id: &str) -> Result<Option<AuditEntry>, AuditError>;

    /// Query audit entries with filters and pagination.
    async fn query(&self, query: &AuditQuery) -> Result<AuditPage, AuditError>;
}
