//! Audit recording middleware.
//!
//! Wraps a route and, after the inner handler returns a 2xx response,
//! appends one [`AuditEntry`] composed from the request/response pair.
//! The middleware is fail-open: the store write returns a `Result` that
//! is logged and discarded, and the handler's response reaches the
//! caller unchanged whether or not the entry was written.
//!
//! Audited routes must produce finite request and response bodies;
//! streaming routes should not be wrapped.

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use pressai_audit::{AuditAction, AuditEntry, AuditStore, EntityType};

use crate::auth::ActorIdentity;

/// What the derivation functions get to look at: the request line and
/// headers, the leniently parsed JSON bodies, and the response status.
pub struct AuditCapture {
    /// Request method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// Request headers.
    pub headers: HeaderMap,
    /// Parsed request body; `None` when absent or not valid JSON.
    pub request_body: Option<serde_json::Value>,
    /// Response status.
    pub status: StatusCode,
    /// Parsed response body; `None` when absent or not valid JSON.
    pub response_body: Option<serde_json::Value>,
}

type CaptureFn<T> = dyn Fn(&AuditCapture) -> T + Send + Sync;

/// Per-route audit configuration.
///
/// Only `action` is required. The derivation functions run after the
/// inner handler, against the captured request/response pair.
#[derive(Clone)]
pub struct AuditSpec {
    action: AuditAction,
    entity_type: Option<EntityType>,
    entity_id: Option<Arc<CaptureFn<Option<String>>>>,
    details: Option<Arc<CaptureFn<serde_json::Value>>>,
    skip: Option<Arc<CaptureFn<bool>>>,
}

impl AuditSpec {
    /// Audit with the given action label.
    pub fn new(action: AuditAction) -> Self {
        Self {
            action,
            entity_type: None,
            entity_id: None,
            details: None,
            skip: None,
        }
    }

    /// Set the entity type recorded on every entry from this route.
    #[must_use]
    pub fn entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    /// Derive the affected entity id from the captured exchange.
    #[must_use]
    pub fn entity_id<F>(mut self, f: F) -> Self
    where
        F: Fn(&AuditCapture) -> Option<String> + Send + Sync + 'static,
    {
        self.entity_id = Some(Arc::new(f));
        self
    }

    /// Derive the `details` payload from the captured exchange.
    #[must_use]
    pub fn details<F>(mut self, f: F) -> Self
    where
        F: Fn(&AuditCapture) -> serde_json::Value + Send + Sync + 'static,
    {
        self.details = Some(Arc::new(f));
        self
    }

    /// Skip auditing entirely when the predicate returns true.
    #[must_use]
    pub fn skip_when<F>(mut self, f: F) -> Self
    where
        F: Fn(&AuditCapture) -> bool + Send + Sync + 'static,
    {
        self.skip = Some(Arc::new(f));
        self
    }
}

/// State for the recorder middleware: the store plus the route's spec.
#[derive(Clone)]
pub struct RecorderState {
    store: Arc<dyn AuditStore>,
    spec: Arc<AuditSpec>,
}

impl RecorderState {
    /// Pair a store with a route spec.
    pub fn new(store: Arc<dyn AuditStore>, spec: AuditSpec) -> Self {
        Self {
            store,
            spec: Arc::new(spec),
        }
    }
}

/// The middleware entry point; install with
/// `axum::middleware::from_fn_with_state(RecorderState::new(store, spec), recorder::record)`.
pub async fn record(
    State(state): State<RecorderState>,
    req: Request,
    next: Next,
) -> Response {
    let (parts, body) = req.into_parts();
    let method = parts.method.clone();
    let path = parts.uri.path().to_owned();
    let headers = parts.headers.clone();
    let actor = parts.extensions.get::<ActorIdentity>().cloned();

    // Buffer body-carrying requests so the inner handler still reads
    // the bytes in full. Parse failures leave `request_body` empty.
    let mut request_body = None;
    let req = if matches!(method, Method::POST | Method::PUT | Method::PATCH) {
        match to_bytes(body, usize::MAX).await {
            Ok(bytes) => {
                request_body = serde_json::from_slice(&bytes).ok();
                Request::from_parts(parts, Body::from(bytes))
            }
            Err(e) => {
                warn!(error = %e, %path, "failed to read request body on audited route");
                return StatusCode::BAD_REQUEST.into_response();
            }
        }
    } else {
        Request::from_parts(parts, body)
    };

    let response = next.run(req).await;
    let status = response.status();

    // Rebuild the response so the derivation functions can see the body
    // while the caller still receives it byte-for-byte.
    let (res_parts, res_body) = response.into_parts();
    let response_body;
    let response = match to_bytes(res_body, usize::MAX).await {
        Ok(bytes) => {
            response_body = serde_json::from_slice(&bytes).ok();
            Response::from_parts(res_parts, Body::from(bytes))
        }
        Err(e) => {
            warn!(error = %e, %path, "failed to buffer response body on audited route");
            response_body = None;
            Response::from_parts(res_parts, Body::empty())
        }
    };

    let capture = AuditCapture {
        method,
        path,
        headers,
        request_body,
        status,
        response_body,
    };

    if let Some(skip) = &state.spec.skip
        && skip(&capture)
    {
        return response;
    }

    if !status.is_success() {
        return response;
    }

    let mut entry = AuditEntry::new(state.spec.action.clone());
    entry.actor_id = actor.and_then(|a| a.user_id);
    entry.entity_type = state.spec.entity_type.clone();
    entry.entity_id = state.spec.entity_id.as_ref().and_then(|f| f(&capture));
    if let Some(details) = &state.spec.details {
        entry.details = details(&capture);
    }
    entry.ip_address = Some(client_ip(&capture.headers));

    // Fail-open: the Result is logged and dropped, never surfaced.
    if let Err(e) = state.store.append(entry).await {
        warn!(error = %e, action = %state.spec.action, "audit append failed");
    }

    response
}

/// Resolve the originating client address from forwarding headers.
/// Fallback chain: `x-forwarded-for` (first hop) -> `x-real-ip` ->
/// `"unknown"`.
pub fn client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_owned();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_owned();
        }
    }

    "unknown".to_owned()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn forwarded_for_wins_over_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(client_ip(&headers), "203.0.113.7");
    }

    #[test]
    fn real_ip_is_the_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(client_ip(&headers), "198.51.100.2");
    }

    #[test]
    fn no_forwarding_headers_yields_unknown() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn empty_forwarded_header_falls_through() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(client_ip(&headers), "198.51.100.2");
    }
}
