use utoipa::OpenApi;

use super::schemas::{
    AuditLogsResponse, CorrectionResponse, CorrectionSubmission, ErrorResponse, HealthResponse,
    Pagination,
};

/// OpenAPI document for the PressAI audit/analytics API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PressAI Audit API",
        description = "Audit trail queries and correction recording for PressAI."
    ),
    paths(
        super::health::health,
        super::audit::query_audit,
        super::audit::get_audit,
        super::corrections::record_correction,
    ),
    components(schemas(
        AuditLogsResponse,
        CorrectionResponse,
        CorrectionSubmission,
        ErrorResponse,
        HealthResponse,
        Pagination,
        pressai_audit::AuditEntry,
        pressai_audit::AuditAction,
        pressai_audit::EntityType,
        pressai_analytics::CorrectionEvent,
    )),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Audit", description = "Audit trail queries"),
        (name = "Analytics", description = "Correction recording"),
    )
)]
pub struct ApiDoc;
