//! HTTP server for the PressAI audit trail and correction recording.

pub mod api;
pub mod analytics_factory;
pub mod audit_factory;
pub mod auth;
pub mod config;
pub mod error;
pub mod recorder;
pub mod telemetry;
