//! Request logging middleware.
//!
//! Every request gets a [`TraceContext`] stored in its extensions and a
//! tracing span. The response is logged with status and latency, at `warn`
//! for client errors and slow requests and at `error` for server errors.
//! The request id is echoed back in the `x-request-id` header.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    time::Instant,
};
use tracing::{debug, error, info, span, warn, Instrument, Level};

use crate::trace_context::{TraceContext, REQUEST_ID_HEADER};

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub service_name: String,
    /// Paths logged at `debug` only (health probes).
    pub quiet_paths: Vec<String>,
    pub slow_request_threshold_ms: u64,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "companies-toolbox".to_string(),
            quiet_paths: vec!["/health".to_string()],
            slow_request_threshold_ms: 1000,
        }
    }
}

impl ObservabilityConfig {
    pub fn for_service(name: impl Into<String>) -> Self {
        Self {
            service_name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_slow_threshold(mut self, ms: u64) -> Self {
        self.slow_request_threshold_ms = ms;
        self
    }
}

#[derive(Clone)]
pub struct ObservabilityMiddleware {
    config: ObservabilityConfig,
}

impl ObservabilityMiddleware {
    pub fn new(config: ObservabilityConfig) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ObservabilityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ObservabilityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ObservabilityMiddlewareService {
            service: Rc::new(service),
            config: self.config.clone(),
        }))
    }
}

pub struct ObservabilityMiddlewareService<S> {
    service: Rc<S>,
    config: ObservabilityConfig,
}

impl<S, B> Service<ServiceRequest> for ObservabilityMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let config = self.config.clone();
        let service = self.service.clone();

        Box::pin(async move {
            let path = req.path().to_string();
            let method = req.method().to_string();
            let quiet = config.quiet_paths.iter().any(|p| path == *p);

            let trace_ctx = TraceContext::from_headers(req.headers());
            req.extensions_mut().insert(trace_ctx.clone());

            debug!(
                trace_id = %trace_ctx.trace_id,
                query = %req.query_string(),
                "→ {} {}", method, path
            );

            let request_span = span!(
                Level::INFO,
                "http_request",
                service = %config.service_name,
                trace_id = %trace_ctx.trace_id,
                request_id = %trace_ctx.request_id,
                method = %method,
                path = %path,
            );

            let start = Instant::now();
            let result = service.call(req).instrument(request_span).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(mut res) => {
                    let status = res.status().as_u16();

                    if let Ok(value) = HeaderValue::from_str(&trace_ctx.request_id) {
                        res.headers_mut()
                            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                    }

                    if status >= 500 {
                        error!(trace_id = %trace_ctx.trace_id, status, duration_ms, "← {} {} {} {}ms", method, path, status, duration_ms);
                    } else if status >= 400 {
                        warn!(trace_id = %trace_ctx.trace_id, status, duration_ms, "← {} {} {} {}ms", method, path, status, duration_ms);
                    } else if duration_ms > config.slow_request_threshold_ms {
                        warn!(trace_id = %trace_ctx.trace_id, status, duration_ms, "← SLOW {} {} {} {}ms", method, path, status, duration_ms);
                    } else if quiet {
                        debug!(trace_id = %trace_ctx.trace_id, status, duration_ms, "← {} {} {} {}ms", method, path, status, duration_ms);
                    } else {
                        info!(trace_id = %trace_ctx.trace_id, status, duration_ms, "← {} {} {} {}ms", method, path, status, duration_ms);
                    }

                    Ok(res)
                }
                Err(e) => {
                    error!(
                        trace_id = %trace_ctx.trace_id,
                        duration_ms,
                        error = %e,
                        "← {} {} ERROR {}ms", method, path, duration_ms
                    );
                    Err(e)
                }
            }
        })
    }
}

pub fn observability(config: ObservabilityConfig) -> ObservabilityMiddleware {
    ObservabilityMiddleware::new(config)
}
