use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use pressai_analytics::CorrectionEvent;
use pressai_audit::AuditEntry;

/// Generic error envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Health probe response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"ok"` when the server is up.
    pub status: String,
}

/// Response envelope for the audit listing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuditLogsResponse {
    /// The matching entries, most recent first.
    pub logs: Vec<AuditEntry>,
    /// Display names for the actor ids appearing in `logs`.
    pub actors_by_id: HashMap<String, String>,
    /// Pagination echo.
    pub pagination: Pagination,
}

/// Pagination metadata.
///
/// `total` is the number of entries in the current page, not a grand
/// total across all pages.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    /// Offset used for this page.
    pub offset: u32,
    /// Limit used for this page.
    pub limit: u32,
    /// Number of entries in this page.
    pub total: u64,
}

/// Request body for recording a correction decision.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CorrectionSubmission {
    /// Whether the user accepted or ignored the suggestion.
    pub accepted: bool,
    /// The suggestion the user acted on.
    pub event: CorrectionEvent,
}

/// Result envelope for the correction endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CorrectionResponse {
    /// Whether the append succeeded.
    pub success: bool,
    /// Failure description, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
