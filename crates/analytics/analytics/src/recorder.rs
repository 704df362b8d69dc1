use std::sync::Arc;

use crate::correction::{CorrectionBucket, CorrectionEvent};
use crate::error::AnalyticsError;
use crate::store::AnalyticsStore;

/// Records user correction decisions onto existing analytics records.
///
/// Single-step and fire-and-forget from the caller's perspective: one
/// partial update per call, no internal retries. Errors are surfaced to
/// the caller, who decides whether to retry or ignore.
pub struct CorrectionRecorder {
    store: Arc<dyn AnalyticsStore>,
}

impl CorrectionRecorder {
    /// Create a recorder over an analytics store.
    pub fn new(store: Arc<dyn AnalyticsStore>) -> Self {
        Self { store }
    }

    /// Append `event` to the accepted or ignored list of the record
    /// identified by `analytics_id`, selected by `accepted`.
    pub async fn record(
        &self,
        analytics_id: &str,
        event: &CorrectionEvent,
        accepted: bool,
    ) -> Result<(), AnalyticsError> {
        if analytics_id.is_empty() {
            return Err(AnalyticsError::Validation(
                "analytics_id must not be empty".to_owned(),
            ));
        }

        let serialized = serde_json::to_string(event)
            .map_err(|e| AnalyticsError::Serialization(e.to_string()))?;

        self.store
            .append_correction(
                analytics_id,
                CorrectionBucket::from_accepted(accepted),
                serialized,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::record::AnalyticsRecord;

    use super::*;

    /// Records every append call without touching real storage.
    #[derive(Default)]
    struct SpyStore {
        appends: Mutex<Vec<(String, CorrectionBucket, String)>>,
        fail_with: Mutex<Option<AnalyticsError>>,
    }

    #[async_trait]
    impl AnalyticsStore for SpyStore {
        async fn create(&self, _record: AnalyticsRecord) -> Result<(), AnalyticsError> {
            Ok(())
        }

        async fn get(&self, _id: &str) -> Result<Option<AnalyticsRecord>, AnalyticsError> {
            Ok(None)
        }

        async fn append_correction(
            &self,
            id: &str,
            bucket: CorrectionBucket,
            value: String,
        ) -> Result<(), AnalyticsError> {
            if let Some(err) = self.fail_with.lock().unwrap().take() {
                return Err(err);
            }
            self.appends
                .lock()
                .unwrap()
                .push((id.to_owned(), bucket, value));
            Ok(())
        }
    }

    fn sample_event() -> CorrectionEvent {
        CorrectionEvent {
            id: "s1".to_owned(),
            original_text: "teh".to_owned(),
            suggested_text: "the".to_owned(),
            explanation: "typo".to_owned(),
            kind: "spelling".to_owned(),
            start_index: 0,
            end_index: 3,
        }
    }

    #[tokio::test]
    async fn routes_accepted_to_accepted_bucket() {
        let store = Arc::new(SpyStore::default());
        let recorder = CorrectionRecorder::new(Arc::clone(&store) as Arc<dyn AnalyticsStore>);

        recorder.record("a1", &sample_event(), true).await.unwrap();
        recorder.record("a1", &sample_event(), false).await.unwrap();

        let appends = store.appends.lock().unwrap();
        assert_eq!(appends.len(), 2);
        assert_eq!(appends[0].1, CorrectionBucket::Accepted);
        assert_eq!(appends[1].1, CorrectionBucket::Ignored);
    }

    #[tokio::test]
    async fn serialized_event_decodes_back() {
        let store = Arc::new(SpyStore::default());
        let recorder = CorrectionRecorder::new(Arc::clone(&store) as Arc<dyn AnalyticsStore>);

        recorder.record("a1", &sample_event(), false).await.unwrap();

        let appends = store.appends.lock().unwrap();
        let decoded: CorrectionEvent = serde_json::from_str(&appends[0].2).unwrap();
        assert_eq!(decoded.original_text, "teh");
        assert_eq!(decoded.kind, "spelling");
    }

    #[tokio::test]
    async fn empty_analytics_id_is_a_validation_error() {
        let store = Arc::new(SpyStore::default());
        let recorder = CorrectionRecorder::new(store);

        let err = recorder
            .record("", &sample_event(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::Validation(_)));
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let store = Arc::new(SpyStore::default());
        *store.fail_with.lock().unwrap() =
            Some(AnalyticsError::NotFound("analytics-404".to_owned()));
        let recorder = CorrectionRecorder::new(Arc::clone(&store) as Arc<dyn AnalyticsStore>);

        let err = recorder
            .record("analytics-404", &sample_event(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::NotFound(_)));
    }
}
