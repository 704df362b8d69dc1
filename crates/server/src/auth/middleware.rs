use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::{ActorIdentity, AuthProvider};

/// Authenticate the request and attach an [`ActorIdentity`] extension.
///
/// With auth disabled (`None` provider) every request runs as the
/// system actor. With auth enabled, a valid key must arrive via
/// `Authorization: Bearer <key>` or `X-API-Key: <key>`; anything else
/// gets 401.
pub async fn authenticate(
    State(auth): State<Option<Arc<AuthProvider>>>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(auth) = auth else {
        req.extensions_mut().insert(ActorIdentity::system());
        return next.run(req).await;
    };

    let raw_key = bearer_token(&req).or_else(|| {
        req.headers()
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    });

    match raw_key.and_then(|key| auth.authenticate(&key)) {
        Some(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "missing or invalid API key" })),
        )
            .into_response(),
    }
}

fn bearer_token(req: &Request) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned)
}
