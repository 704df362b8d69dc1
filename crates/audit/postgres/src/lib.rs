//! Postgres audit store backend for PressAI.

pub mod config;
pub mod migrations;
pub mod store;

pub use config::PostgresAuditConfig;
pub use store::PostgresAuditStore;
