//! Postgres analytics store backend for PressAI.

pub mod config;
pub mod migrations;
pub mod store;

pub use config::PostgresAnalyticsConfig;
pub use store::PostgresAnalyticsStore;
