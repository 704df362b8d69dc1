use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use pressai_analytics::{AnalyticsError, CorrectionRecorder};

use super::AppState;
use super::schemas::{CorrectionResponse, CorrectionSubmission};

/// `POST /v1/analytics/{analytics_id}/corrections` -- record a user's
/// accept/ignore decision on one text suggestion.
#[utoipa::path(
    post,
    path = "/v1/analytics/{analytics_id}/corrections",
    tag = "Analytics",
    summary = "Record a correction decision",
    description = "Appends the suggestion to the accepted or ignored list of an existing analytics record. Duplicate submissions accumulate; no deduplication is performed.",
    params(
        ("analytics_id" = String, Path, description = "Analytics record id"),
    ),
    request_body = CorrectionSubmission,
    responses(
        (status = 200, description = "Correction recorded", body = CorrectionResponse),
        (status = 400, description = "Invalid submission", body = CorrectionResponse),
        (status = 404, description = "Analytics record not found", body = CorrectionResponse),
        (status = 500, description = "Store failure", body = CorrectionResponse)
    )
)]
pub async fn record_correction(
    State(state): State<AppState>,
    Path(analytics_id): Path<String>,
    Json(submission): Json<CorrectionSubmission>,
) -> impl IntoResponse {
    let recorder = CorrectionRecorder::new(Arc::clone(&state.analytics));

    match recorder
        .record(&analytics_id, &submission.event, submission.accepted)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(CorrectionResponse {
                success: true,
                error: None,
            }),
        ),
        Err(e) => {
            let status = match &e {
                AnalyticsError::Validation(_) => StatusCode::BAD_REQUEST,
                AnalyticsError::NotFound(_) => StatusCode::NOT_FOUND,
                AnalyticsError::Storage(_) | AnalyticsError::Serialization(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (
                status,
                Json(CorrectionResponse {
                    success: false,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
