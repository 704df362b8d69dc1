use std::sync::Arc;

use pressai_analytics::AnalyticsStore;
use pressai_analytics_memory::MemoryAnalyticsStore;
#[cfg(feature = "postgres")]
use pressai_analytics_postgres::{PostgresAnalyticsConfig, PostgresAnalyticsStore};

use crate::config::StoreBackendConfig;
use crate::error::ServerError;

/// Create an analytics store from the given configuration.
#[allow(clippy::unused_async)]
pub async fn create_analytics_store(
    config: &StoreBackendConfig,
) -> Result<Arc<dyn AnalyticsStore>, ServerError> {
    let store: Arc<dyn AnalyticsStore> = match config.backend.as_str() {
        "memory" => Arc::new(MemoryAnalyticsStore::new()),
        #[cfg(feature = "postgres")]
        "postgres" => {
            let url = config.url.as_deref().ok_or_else(|| {
                ServerError::Config("analytics postgres backend requires [analytics] url".into())
            })?;

            let pg_config = PostgresAnalyticsConfig::new(url).with_prefix(&config.prefix);

            let store = PostgresAnalyticsStore::new(&pg_config)
                .await
                .map_err(|e| ServerError::Config(format!("analytics postgres: {e}")))?;

            Arc::new(store)
        }
        other => {
            return Err(ServerError::Config(format!(
                "unknown analytics backend: {other} (is the feature enabled?)"
            )));
        }
    };

    Ok(store)
}
