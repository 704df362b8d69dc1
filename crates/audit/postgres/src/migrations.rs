use sqlx::PgPool;

/// Run the audit table migration, creating the table and indexes if they do
/// not already exist.
pub async fn run_migrations(pool: &PgPool, prefix: &str) -> Result<(), sqlx::Error> {
    let table = format!("{prefix}audit_log");

    let create_table = format!(
        "
        CREATE TABLE IF NOT EXISTS {table} (
            id          TEXT PRIMARY KEY,
            actor_id    TEXT,
            action      TEXT NOT NULL,
            entity_type TEXT,
            entity_id   TEXT,
            details     JSONB NOT NULL DEFAULT '{{}}'::jsonb,
            ip_address  TEXT,
            created_at  TIMESTAMPTZ NOT NULL
        )
        "
    );

    sqlx::query(&create_table).execute(pool).await?;

    let indexes = [
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{prefix}audit_log_created ON {table} (created_at DESC)"
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{prefix}audit_log_actor ON {table} (actor_id, created_at DESC)"
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{prefix}audit_log_entity ON {table} (entity_type, created_at DESC)"
        ),
    ];

    for idx in &indexes {
        sqlx::query(idx).execute(pool).await?;
    }

    Ok(())
}
