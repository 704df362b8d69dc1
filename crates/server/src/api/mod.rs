//! HTTP API surface: routes, shared state, and response schemas.

pub mod audit;
pub mod corrections;
pub mod health;
pub mod openapi;
pub mod schemas;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use pressai_analytics::AnalyticsStore;
use pressai_audit::{AuditAction, AuditStore, EntityType};

use crate::auth::AuthProvider;
use crate::recorder::{self, AuditSpec, RecorderState};

use self::openapi::ApiDoc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The audit store.
    pub audit: Arc<dyn AuditStore>,
    /// The analytics store.
    pub analytics: Arc<dyn AnalyticsStore>,
    /// Optional auth provider (None when auth is disabled).
    pub auth: Option<Arc<AuthProvider>>,
}

/// Build the Axum router with all API routes, middleware, and Swagger UI.
pub fn router(state: AppState) -> Router {
    let public = Router::new().route("/health", get(health::health));

    // The corrections route is itself audited: entity id from the path,
    // the accept/ignore decision in the details.
    let corrections_spec = AuditSpec::new(AuditAction::new("analytics.correction"))
        .entity_type(EntityType::new("analytics"))
        .entity_id(|cap| cap.path.split('/').nth(3).map(str::to_owned))
        .details(|cap| {
            serde_json::json!({
                "accepted": cap
                    .request_body
                    .as_ref()
                    .and_then(|body| body.get("accepted"))
                    .cloned()
                    .unwrap_or(serde_json::Value::Null),
            })
        });

    let protected = Router::new()
        // Audit trail (owner/admin)
        .route("/v1/audit", get(audit::query_audit))
        .route("/v1/audit/{id}", get(audit::get_audit))
        // Correction recording
        .route(
            "/v1/analytics/{analytics_id}/corrections",
            post(corrections::record_correction).layer(middleware::from_fn_with_state(
                RecorderState::new(Arc::clone(&state.audit), corrections_spec),
                recorder::record,
            )),
        )
        // Auth runs before the recorder so ActorIdentity is available.
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            crate::auth::middleware::authenticate,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
