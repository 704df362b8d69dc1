use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which PressAI tool produced an analytics record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Proofreader,
    ThreadGenerator,
    SummaryGenerator,
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proofreader => write!(f, "proofreader"),
            Self::ThreadGenerator => write!(f, "thread_generator"),
            Self::SummaryGenerator => write!(f, "summary_generator"),
        }
    }
}

impl ToolKind {
    /// Parse a tool kind from a string.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s {
            "proofreader" => Some(Self::Proofreader),
            "thread_generator" => Some(Self::ThreadGenerator),
            "summary_generator" => Some(Self::SummaryGenerator),
            _ => None,
        }
    }
}

/// A per-tool-invocation analytics record.
///
/// The correction lists hold serialized [`crate::CorrectionEvent`]s in
/// submission order. Duplicates are allowed; repeated submissions of the
/// same suggestion simply accumulate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsRecord {
    /// Unique identifier, assigned by the owning feature module.
    pub id: String,
    /// The tool this record belongs to.
    pub tool: ToolKind,
    /// Serialized correction events the user accepted.
    #[serde(default)]
    pub accepted_corrections: Vec<String>,
    /// Serialized correction events the user ignored.
    #[serde(default)]
    pub ignored_corrections: Vec<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl AnalyticsRecord {
    /// Create an empty record for `tool`.
    pub fn new(id: impl Into<String>, tool: ToolKind) -> Self {
        Self {
            id: id.into(),
            tool,
            accepted_corrections: Vec::new(),
            ignored_corrections: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ToolKind::ThreadGenerator).unwrap();
        assert_eq!(json, "\"thread_generator\"");
        assert_eq!(
            ToolKind::from_str_loose("summary_generator"),
            Some(ToolKind::SummaryGenerator)
        );
        assert_eq!(ToolKind::from_str_loose("unknown"), None);
    }

    #[test]
    fn new_record_has_empty_lists() {
        let record = AnalyticsRecord::new("a1", ToolKind::Proofreader);
        assert!(record.accepted_corrections.is_empty());
        assert!(record.ignored_corrections.is_empty());
    }
}
