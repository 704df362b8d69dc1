use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user's accept/ignore decision on a single proposed text suggestion.
///
/// Transient: serialized and folded into the parent analytics record,
/// never stored on its own. Index ordering and id uniqueness are not
/// validated; repeated submissions of the same suggestion accumulate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CorrectionEvent {
    /// Identifier of the originating suggestion.
    pub id: String,
    /// The text span as the user wrote it.
    pub original_text: String,
    /// The proposed replacement.
    pub suggested_text: String,
    /// Why the suggestion was made.
    pub explanation: String,
    /// Category of correction (conventionally `spelling`, `grammar`,
    /// or `style`).
    pub kind: String,
    /// Start offset into the analyzed text.
    pub start_index: u32,
    /// End offset into the analyzed text.
    pub end_index: u32,
}

/// Which correction list on the analytics record an event lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionBucket {
    /// The user applied the suggestion.
    Accepted,
    /// The user dismissed the suggestion.
    Ignored,
}

impl CorrectionBucket {
    /// Select the bucket for a user decision.
    pub fn from_accepted(accepted: bool) -> Self {
        if accepted { Self::Accepted } else { Self::Ignored }
    }

    /// The column/field name backing this bucket.
    pub fn column(self) -> &'static str {
        match self {
            Self::Accepted => "accepted_corrections",
            Self::Ignored => "ignored_corrections",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_from_accepted() {
        assert_eq!(
            CorrectionBucket::from_accepted(true),
            CorrectionBucket::Accepted
        );
        assert_eq!(
            CorrectionBucket::from_accepted(false),
            CorrectionBucket::Ignored
        );
        assert_eq!(CorrectionBucket::Accepted.column(), "accepted_corrections");
        assert_eq!(CorrectionBucket::Ignored.column(), "ignored_corrections");
    }

    #[test]
    fn event_round_trips_through_json() {
        let event = CorrectionEvent {
            id: "s1".to_owned(),
            original_text: "teh".to_owned(),
            suggested_text: "the".to_owned(),
            explanation: "typo".to_owned(),
            kind: "spelling".to_owned(),
            start_index: 0,
            end_index: 3,
        };
        let serialized = serde_json::to_string(&event).unwrap();
        let decoded: CorrectionEvent = serde_json::from_str(&serialized).unwrap();
        assert_eq!(decoded.original_text, "teh");
        assert_eq!(decoded.end_index, 3);
    }
}
