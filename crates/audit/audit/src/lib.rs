//! Audit trail core types and store trait for PressAI.
//!
//! An audit entry records one successful administrative action: who
//! performed it, what it affected, and from where. Entries are
//! append-only; the [`AuditStore`] trait deliberately exposes no update
//! or delete operation.

pub mod action;
pub mod entry;
pub mod error;
pub mod query;
pub mod store;

pub use action::{AuditAction, EntityType};
pub use entry::AuditEntry;
pub use error::AuditError;
pub use query::{AuditPage, AuditQuery};
pub use store::AuditStore;
