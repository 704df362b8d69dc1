use sqlx::PgPool;

/// Run the analytics table migration, creating the table and indexes if
/// they do not already exist.
pub async fn run_migrations(pool: &PgPool, prefix: &str) -> Result<(), sqlx::Error> {
    let table = format!("{prefix}analytics");

    let create_table = format!(
        "
        CREATE TABLE IF NOT EXISTS {table} (
            id                    TEXT PRIMARY KEY,
            tool                  TEXT NOT NULL,
            accepted_corrections  JSONB NOT NULL DEFAULT '[]'::jsonb,
            ignored_corrections   JSONB NOT NULL DEFAULT '[]'::jsonb,
            created_at            TIMESTAMPTZ NOT NULL
        )
        "
    );

    sqlx::query(&create_table).execute(pool).await?;

    let index = format!(
        "CREATE INDEX IF NOT EXISTS idx_{prefix}analytics_tool ON {table} (tool, created_at DESC)"
    );
    sqlx::query(&index).execute(pool).await?;

    Ok(())
}
