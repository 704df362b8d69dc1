use async_trait::async_trait;
use dashmap::DashMap;

use pressai_analytics::correction::CorrectionBucket;
use pressai_analytics::error::AnalyticsError;
use pressai_analytics::record::AnalyticsRecord;
use pressai_analytics::store::AnalyticsStore;

/// In-memory analytics store using `DashMap`. Suitable for development
/// and testing.
///
/// Appends run under the map's per-entry lock, so concurrent
/// submissions against the same record are serialized rather than lost.
pub struct MemoryAnalyticsStore {
    records: DashMap<String, AnalyticsRecord>,
}

impl MemoryAnalyticsStore {
    /// Create a new empty in-memory analytics store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }
}

impl Default for MemoryAnalyticsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalyticsStore for MemoryAnalyticsStore {
    async fn create(&self, record: AnalyticsRecord) -> Result<(), AnalyticsError> {
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<AnalyticsRecord>, AnalyticsError> {
        Ok(self.records.get(id).map(|r| r.value().clone()))
    }

    async fn append_correction(
        &self,
        id: &str,
        bucket: CorrectionBucket,
        value: String,
    ) -> Result<(), AnalyticsError> {
        let Some(mut record) = self.records.get_mut(id) else {
            return Err(AnalyticsError::NotFound(id.to_owned()));
        };

        match bucket {
            CorrectionBucket::Accepted => record.accepted_corrections.push(value),
            CorrectionBucket::Ignored => record.ignored_corrections.push(value),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pressai_analytics::correction::{CorrectionBucket, CorrectionEvent};
    use pressai_analytics::error::AnalyticsError;
    use pressai_analytics::record::{AnalyticsRecord, ToolKind};
    use pressai_analytics::store::AnalyticsStore;

    use super::MemoryAnalyticsStore;

    fn serialized_event(original: &str) -> String {
        serde_json::to_string(&CorrectionEvent {
            id: "s1".to_owned(),
            original_text: original.to_owned(),
            suggested_text: "the".to_owned(),
            explanation: "typo".to_owned(),
            kind: "spelling".to_owned(),
            start_index: 0,
            end_index: 3,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn create_and_get() {
        let store = MemoryAnalyticsStore::new();
        store
            .create(AnalyticsRecord::new("a1", ToolKind::Proofreader))
            .await
            .unwrap();

        let record = store.get("a1").await.unwrap().unwrap();
        assert_eq!(record.tool, ToolKind::Proofreader);
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn append_to_missing_record_is_not_found() {
        let store = MemoryAnalyticsStore::new();
        let err = store
            .append_correction("missing", CorrectionBucket::Accepted, serialized_event("teh"))
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_appends_accumulate() {
        let store = MemoryAnalyticsStore::new();
        store
            .create(AnalyticsRecord::new("a1", ToolKind::Proofreader))
            .await
            .unwrap();

        // Same event twice: both copies must land, no deduplication.
        store
            .append_correction("a1", CorrectionBucket::Accepted, serialized_event("teh"))
            .await
            .unwrap();
        store
            .append_correction("a1", CorrectionBucket::Accepted, serialized_event("teh"))
            .await
            .unwrap();

        let record = store.get("a1").await.unwrap().unwrap();
        assert_eq!(record.accepted_corrections.len(), 2);
        assert!(record.ignored_corrections.is_empty());
    }

    #[tokio::test]
    async fn buckets_never_cross() {
        let store = MemoryAnalyticsStore::new();
        store
            .create(AnalyticsRecord::new("a1", ToolKind::Proofreader))
            .await
            .unwrap();

        store
            .append_correction("a1", CorrectionBucket::Accepted, serialized_event("teh"))
            .await
            .unwrap();
        store
            .append_correction("a1", CorrectionBucket::Ignored, serialized_event("recieve"))
            .await
            .unwrap();

        let record = store.get("a1").await.unwrap().unwrap();
        assert_eq!(record.accepted_corrections.len(), 1);
        assert_eq!(record.ignored_corrections.len(), 1);
    }

    #[tokio::test]
    async fn appended_event_decodes_back() {
        let store = MemoryAnalyticsStore::new();
        store
            .create(AnalyticsRecord::new("analytics-1", ToolKind::Proofreader))
            .await
            .unwrap();

        store
            .append_correction(
                "analytics-1",
                CorrectionBucket::Ignored,
                serialized_event("teh"),
            )
            .await
            .unwrap();

        let record = store.get("analytics-1").await.unwrap().unwrap();
        assert_eq!(record.ignored_corrections.len(), 1);
        let decoded: CorrectionEvent =
            serde_json::from_str(&record.ignored_corrections[0]).unwrap();
        assert_eq!(decoded.original_text, "teh");
    }
}
