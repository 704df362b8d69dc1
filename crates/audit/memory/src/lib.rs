//! In-memory audit store backend for PressAI.

mod store;

pub use store::MemoryAuditStore;
