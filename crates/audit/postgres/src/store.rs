use async_trait::async_trait;
use sqlx::PgPool;

use pressai_audit::action::{AuditAction, EntityType};
use pressai_audit::entry::AuditEntry;
use pressai_audit::error::AuditError;
use pressai_audit::query::{AuditPage, AuditQuery};
use pressai_audit::store::AuditStore;

use crate::config::PostgresAuditConfig;
use crate::migrations;

/// Postgres-backed audit store using `sqlx`.
pub struct PostgresAuditStore {
    pool: PgPool,
    table: String,
}

impl PostgresAuditStore {
    /// Create a new store, connecting to Postgres and running migrations.
    pub async fn new(config: &PostgresAuditConfig) -> Result<Self, AuditError> {
        let pool = PgPool::connect(&config.url)
            .await
            .map_err(|e| AuditError::Storage(e.to_string()))?;

        migrations::run_migrations(&pool, &config.prefix)
            .await
            .map_err(|e| AuditError::Storage(e.to_string()))?;

        Ok(Self {
            pool,
            table: format!("{}audit_log", config.prefix),
        })
    }

    /// Create from an existing pool (useful for testing).
    pub async fn from_pool(pool: PgPool, prefix: &str) -> Result<Self, AuditError> {
        migrations::run_migrations(&pool, prefix)
            .await
            .map_err(|e| AuditError::Storage(e.to_string()))?;

        Ok(Self {
            pool,
            table: format!("{prefix}audit_log"),
        })
    }
}

#[async_trait]
impl AuditStore for PostgresAuditStore {
    async fn append(&self, entry: AuditEntry) -> Result<String, AuditError> {
        let sql = format!(
            r"
            INSERT INTO {} (
                id, actor_id, action, entity_type, entity_id,
                details, ip_address, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
            self.table
        );

        sqlx::query(&sql)
            .bind(&entry.id)
            .bind(&entry.actor_id)
            .bind(entry.action.as_str())
            .bind(entry.entity_type.as_ref().map(EntityType::as_str))
            .bind(&entry.entity_id)
            .bind(&entry.details)
            .bind(&entry.ip_address)
            .bind(entry.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| AuditError::Storage(e.to_string()))?;

        Ok(entry.id)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<AuditEntry>, AuditError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", self.table);

        let row = sqlx::query_as::<_, AuditRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuditError::Storage(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    async fn query(&self, query: &AuditQuery) -> Result<AuditPage, AuditError> {
        let limit = query.effective_limit();
        let offset = query.effective_offset();
        let (where_clause, binds, bind_idx) = build_where_clause(query);

        // Count query.
        let count_sql = format!("SELECT COUNT(*) as cnt FROM {} {where_clause}", self.table);
        let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
        for b in &binds {
            count_q = count_q.bind(b);
        }
        if query.from.is_some() {
            count_q = count_q.bind(query.from);
        }
        if query.to.is_some() {
            count_q = count_q.bind(query.to);
        }

        let total = count_q
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AuditError::Storage(e.to_string()))?;

        // Data query.
        let limit_idx = bind_idx;
        let offset_idx = bind_idx + 1;
        let data_sql = format!(
            "SELECT * FROM {} {where_clause} ORDER BY created_at DESC LIMIT ${limit_idx} OFFSET ${offset_idx}",
            self.table
        );

        let mut data_q = sqlx::query_as::<_, AuditRow>(&data_sql);
        for b in &binds {
            data_q = data_q.bind(b);
        }
        if query.from.is_some() {
            data_q = data_q.bind(query.from);
        }
        if query.to.is_some() {
            data_q = data_q.bind(query.to);
        }
        data_q = data_q.bind(i64::from(limit));
        data_q = data_q.bind(i64::from(offset));

        let rows: Vec<AuditRow> = data_q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AuditError::Storage(e.to_string()))?;

        let entries = rows.into_iter().map(Into::into).collect();

        #[allow(clippy::cast_sign_loss)]
        let total = total as u64;

        Ok(AuditPage {
            entries,
            total,
            limit,
            offset,
        })
    }
}

/// Build the WHERE clause and bind values for the query. Returns the
/// clause, the string binds in order, and the next free bind index
/// (the `from`/`to` timestamps are bound by the caller after the
/// string binds).
fn build_where_clause(query: &AuditQuery) -> (String, Vec<String>, u32) {
    let mut conditions = Vec::new();
    let mut bind_idx = 1u32;
    let mut binds: Vec<String> = Vec::new();

    if let Some(ref actor) = query.actor_id {
        conditions.push(format!("actor_id = ${bind_idx}"));
        binds.push(actor.clone());
        bind_idx += 1;
    }

    // Substring match on the action label.
    if let Some(ref action) = query.action {
        conditions.push(format!("action LIKE '%' || ${bind_idx} || '%'"));
        binds.push(action.clone());
        bind_idx += 1;
    }

    if let Some(ref et) = query.entity_type {
        conditions.push(format!("entity_type = ${bind_idx}"));
        binds.push(et.clone());
        bind_idx += 1;
    }

    if query.from.is_some() {
        conditions.push(format!("created_at >= ${bind_idx}"));
        bind_idx += 1;
    }

    if query.to.is_some() {
        conditions.push(format!("created_at <= ${bind_idx}"));
        bind_idx += 1;
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, binds, bind_idx)
}

/// Internal row type for mapping database rows to `AuditEntry`.
#[derive(sqlx::FromRow)]
struct AuditRow {
    id: String,
    actor_id: Option<String>,
    action: String,
    entity_type: Option<String>,
    entity_id: Option<String>,
    details: serde_json::Value,
    ip_address: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<AuditRow> for AuditEntry {
    fn from(row: AuditRow) -> Self {
        Self {
            id: row.id,
            actor_id: row.actor_id,
            action: AuditAction::new(row.action),
            entity_type: row.entity_type.map(EntityType::new),
            entity_id: row.entity_id,
            details: row.details,
            ip_address: row.ip_address,
            created_at: row.created_at,
        }
    }
}
