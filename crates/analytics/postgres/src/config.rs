/// Configuration for the Postgres analytics store.
pub struct PostgresAnalyticsConfig {
    /// Postgres connection URL.
    pub url: String,
    /// Table name prefix (e.g. "pressai_").
    pub prefix: String,
}

impl PostgresAnalyticsConfig {
    /// Create a new configuration with the given URL and defaults.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            prefix: "pressai_".to_owned(),
        }
    }

    /// Set the table prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}
