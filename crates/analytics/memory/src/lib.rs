//! In-memory analytics store backend for PressAI.

mod store;

pub use store::MemoryAnalyticsStore;
