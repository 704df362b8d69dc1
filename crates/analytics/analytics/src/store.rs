use async_trait::async_trait;

use crate::correction::CorrectionBucket;
use crate::error::AnalyticsError;
use crate::record::AnalyticsRecord;

/// Trait for analytics record storage backends.
///
/// `append_correction` must be atomic at the single-row level so that
/// concurrent submissions against the same record are never lost.
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    /// Persist a new analytics record. Called by the feature module
    /// that owns the record, not by the correction path.
    async fn create(&self, record: AnalyticsRecord) -> Result<(), AnalyticsError>;

    /// Retrieve an analytics record by id.
    async fn get(&self, id: &str) -> Result<Option<AnalyticsRecord>, AnalyticsError>;

    /// Append one serialized correction event to the given bucket of an
    /// existing record. Returns [`AnalyticsError::NotFound`] when the
    /// record does not exist.
    async fn append_correction(
        &self,
        id: &str,
        bucket: CorrectionBucket,
        value: String,
    ) -> Result<(), AnalyticsError>;
}
