//! Trace identifiers carried by each request.
//!
//! Accepts a W3C `traceparent` header, falls back to `x-trace-id` /
//! `x-request-id`, and otherwise mints fresh ids.

use actix_web::{http::header::HeaderMap, HttpMessage, HttpRequest};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

pub const TRACE_ID_HEADER: &str = "x-trace-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const W3C_TRACEPARENT_HEADER: &str = "traceparent";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: String,
    pub span_id: String,
    pub parent_span_id: Option<String>,
    pub request_id: String,
}

impl TraceContext {
    pub fn new() -> Self {
        let trace_id = Uuid::new_v4().simple().to_string();
        Self {
            request_id: trace_id.clone(),
            trace_id,
            span_id: generate_span_id(),
            parent_span_id: None,
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        if let Some(ctx) = header(W3C_TRACEPARENT_HEADER).and_then(|tp| Self::parse_traceparent(&tp)) {
            return match header(REQUEST_ID_HEADER) {
                Some(request_id) => Self { request_id, ..ctx },
                None => ctx,
            };
        }

        let trace_id = header(TRACE_ID_HEADER).unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        let request_id = header(REQUEST_ID_HEADER).unwrap_or_else(|| trace_id.clone());

        Self {
            trace_id,
            span_id: generate_span_id(),
            parent_span_id: None,
            request_id,
        }
    }

    /// Format: `version-trace_id-parent_id-flags`, e.g. `00-4bf9...-00f0...-01`.
    fn parse_traceparent(value: &str) -> Option<Self> {
        let parts: Vec<&str> = value.split('-').collect();
        if parts.len() != 4 || parts[1].is_empty() || parts[2].is_empty() {
            return None;
        }
        Some(Self {
            trace_id: parts[1].to_string(),
            span_id: generate_span_id(),
            parent_span_id: Some(parts[2].to_string()),
            request_id: parts[1].to_string(),
        })
    }
}

impl Default for TraceContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TraceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trace_id={} span_id={}", self.trace_id, self.span_id)
    }
}

fn generate_span_id() -> String {
    Uuid::new_v4().simple().to_string()[..16].to_string()
}

/// Trace context stored by [`crate::ObservabilityMiddleware`], or a fresh one.
pub fn get_trace_context(req: &HttpRequest) -> TraceContext {
    req.extensions()
        .get::<TraceContext>()
        .cloned()
        .unwrap_or_else(|| TraceContext::from_headers(req.headers()))
}
