use async_trait::async_trait;
use sqlx::PgPool;

use pressai_analytics::correction::CorrectionBucket;
use pressai_analytics::error::AnalyticsError;
use pressai_analytics::record::{AnalyticsRecord, ToolKind};
use pressai_analytics::store::AnalyticsStore;

use crate::config::PostgresAnalyticsConfig;
use crate::migrations;

/// Postgres-backed analytics store using `sqlx`.
///
/// Correction appends are a single `UPDATE ... SET col = col || ...`
/// statement, so concurrent submissions against the same record are
/// serialized by the row lock and never lost.
pub struct PostgresAnalyticsStore {
    pool: PgPool,
    table: String,
}

impl PostgresAnalyticsStore {
    /// Create a new store, connecting to Postgres and running migrations.
    pub async fn new(config: &PostgresAnalyticsConfig) -> Result<Self, AnalyticsError> {
        let pool = PgPool::connect(&config.url)
            .await
            .map_err(|e| AnalyticsError::Storage(e.to_string()))?;

        migrations::run_migrations(&pool, &config.prefix)
            .await
            .map_err(|e| AnalyticsError::Storage(e.to_string()))?;

        Ok(Self {
            pool,
            table: format!("{}analytics", config.prefix),
        })
    }

    /// Create from an existing pool (useful for testing).
    pub async fn from_pool(pool: PgPool, prefix: &str) -> Result<Self, AnalyticsError> {
        migrations::run_migrations(&pool, prefix)
            .await
            .map_err(|e| AnalyticsError::Storage(e.to_string()))?;

        Ok(Self {
            pool,
            table: format!("{prefix}analytics"),
        })
    }
}

#[async_trait]
impl AnalyticsStore for PostgresAnalyticsStore {
    async fn create(&self, record: AnalyticsRecord) -> Result<(), AnalyticsError> {
        let sql = format!(
            r"
            INSERT INTO {} (id, tool, accepted_corrections, ignored_corrections, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
            self.table
        );

        let accepted = serde_json::to_value(&record.accepted_corrections)
            .map_err(|e| AnalyticsError::Serialization(e.to_string()))?;
        let ignored = serde_json::to_value(&record.ignored_corrections)
            .map_err(|e| AnalyticsError::Serialization(e.to_string()))?;

        sqlx::query(&sql)
            .bind(&record.id)
            .bind(record.tool.to_string())
            .bind(accepted)
            .bind(ignored)
            .bind(record.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| AnalyticsError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<AnalyticsRecord>, AnalyticsError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", self.table);

        let row = sqlx::query_as::<_, AnalyticsRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AnalyticsError::Storage(e.to_string()))?;

        row.map(AnalyticsRow::into_record).transpose()
    }

    async fn append_correction(
        &self,
        id: &str,
        bucket: CorrectionBucket,
        value: String,
    ) -> Result<(), AnalyticsError> {
        // bucket.column() is one of two static identifiers, never user input.
        let column = bucket.column();
        let sql = format!(
            "UPDATE {} SET {column} = {column} || to_jsonb($2::text) WHERE id = $1",
            self.table
        );

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(&value)
            .execute(&self.pool)
            .await
            .map_err(|e| AnalyticsError::Storage(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AnalyticsError::NotFound(id.to_owned()));
        }

        Ok(())
    }
}

/// Internal row type for mapping database rows to `AnalyticsRecord`.
#[derive(sqlx::FromRow)]
struct AnalyticsRow {
    id: String,
    tool: String,
    accepted_corrections: serde_json::Value,
    ignored_corrections: serde_json::Value,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl AnalyticsRow {
    fn into_record(self) -> Result<AnalyticsRecord, AnalyticsError> {
        let tool = ToolKind::from_str_loose(&self.tool)
            .ok_or_else(|| AnalyticsError::Serialization(format!("unknown tool: {}", self.tool)))?;

        Ok(AnalyticsRecord {
            id: self.id,
            tool,
            accepted_corrections: string_list(self.accepted_corrections),
            ignored_corrections: string_list(self.ignored_corrections),
            created_at: self.created_at,
        })
    }
}

/// Extract a JSONB array of strings, dropping non-string elements.
fn string_list(value: serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::string_list;

    #[test]
    fn string_list_drops_non_strings() {
        let value = serde_json::json!(["a", 1, "b", null]);
        assert_eq!(string_list(value), vec!["a".to_owned(), "b".to_owned()]);
        assert!(string_list(serde_json::json!({})).is_empty());
    }
}
