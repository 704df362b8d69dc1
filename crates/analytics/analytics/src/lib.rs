//! Analytics record types and correction recording for PressAI.
//!
//! An analytics record is created once per tool invocation by the
//! feature module that owns it (proofreader, thread generator, summary
//! generator). This crate only appends user correction decisions to an
//! existing record; it never creates or deletes records on its own.

pub mod correction;
pub mod error;
pub mod record;
pub mod recorder;
pub mod store;

pub use correction::{CorrectionBucket, CorrectionEvent};
pub use error::AnalyticsError;
pub use record::{AnalyticsRecord, ToolKind};
pub use recorder::CorrectionRecorder;
pub use store::AnalyticsStore;
