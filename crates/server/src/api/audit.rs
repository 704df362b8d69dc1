use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use pressai_audit::AuditQuery;

use crate::auth::ActorIdentity;
use crate::auth::role::Permission;

use super::AppState;
use super::schemas::{AuditLogsResponse, ErrorResponse, Pagination};

/// Query parameters for the audit listing endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AuditListParams {
    /// Filter by acting user (exact match).
    pub actor_id: Option<String>,
    /// Filter by action label (substring match).
    pub action: Option<String>,
    /// Filter by entity type (exact match).
    pub entity_type: Option<String>,
    /// Only entries created at or after this time (RFC 3339).
    pub from: Option<DateTime<Utc>>,
    /// Only entries created at or before this time (RFC 3339).
    pub to: Option<DateTime<Utc>>,
    /// Maximum number of entries to return (default 50, max 1000).
    pub limit: Option<u32>,
    /// Number of entries to skip.
    pub offset: Option<u32>,
}

/// `GET /v1/audit` -- query the audit trail.
#[utoipa::path(
    get,
    path = "/v1/audit",
    tag = "Audit",
    summary = "Query audit entries",
    description = "Returns audit entries ordered by creation time descending. Requires the owner or admin role. `pagination.total` counts only the current page.",
    params(AuditListParams),
    responses(
        (status = 200, description = "Matching audit entries", body = AuditLogsResponse),
        (status = 403, description = "Caller lacks the audit read permission", body = ErrorResponse)
    )
)]
pub async fn query_audit(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<ActorIdentity>,
    Query(params): Query<AuditListParams>,
) -> impl IntoResponse {
    if !identity.role.has_permission(Permission::AuditRead) {
        return (
            StatusCode::FORBIDDEN,
            Json(serde_json::json!(ErrorResponse {
                error: format!("role {} cannot read audit logs", identity.role),
            })),
        );
    }

    let query = AuditQuery {
        actor_id: params.actor_id,
        action: params.action,
        entity_type: params.entity_type,
        from: params.from,
        to: params.to,
        limit: params.limit,
        offset: params.offset,
    };

    match state.audit.query(&query).await {
        Ok(page) => {
            let mut actors_by_id: HashMap<String, String> = HashMap::new();
            if let Some(ref auth) = state.auth {
                for entry in &page.entries {
                    if let Some(ref actor_id) = entry.actor_id
                        && let Some(name) = auth.display_name(actor_id)
                    {
                        actors_by_id.insert(actor_id.clone(), name.to_owned());
                    }
                }
            }

            // total reflects the current page only.
            let pagination = Pagination {
                offset: page.offset,
                limit: page.limit,
                total: page.entries.len() as u64,
            };

            (
                StatusCode::OK,
                Json(serde_json::json!(AuditLogsResponse {
                    logs: page.entries,
                    actors_by_id,
                    pagination,
                })),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!(ErrorResponse {
                error: e.to_string(),
            })),
        ),
    }
}

/// `GET /v1/audit/{id}` -- fetch a single audit entry.
#[utoipa::path(
    get,
    path = "/v1/audit/{id}",
    tag = "Audit",
    summary = "Get one audit entry",
    params(
        ("id" = String, Path, description = "Audit entry id"),
    ),
    responses(
        (status = 200, description = "The audit entry", body = pressai_audit::AuditEntry),
        (status = 403, description = "Caller lacks the audit read permission", body = ErrorResponse),
        (status = 404, description = "No entry with this id", body = ErrorResponse)
    )
)]
pub async fn get_audit(
    State(state): State<AppState>,
    axum::Extension(identity): axum::Extension<ActorIdentity>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    if !identity.role.has_permission(Permission::AuditRead) {
        return (
            StatusCode::FORBIDDEN,
            Json(serde_json::json!(ErrorResponse {
                error: format!("role {} cannot read audit logs", identity.role),
            })),
        );
    }

    match state.audit.get_by_id(&id).await {
        Ok(Some(entry)) => (StatusCode::OK, Json(serde_json::json!(entry))),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!(ErrorResponse {
                error: format!("no audit entry with id {id}"),
            })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!(ErrorResponse {
                error: e.to_string(),
            })),
        ),
    }
}
