//! One structured line per completed request.
//!
//! Severity tracks the response class: 5xx logs at error, 4xx at warn,
//! everything else at info. Health probes log at debug so a poller does
//! not drown the feed.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, error, info, warn};

const QUIET_PATHS: [&str; 1] = ["/health"];

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let quiet = QUIET_PATHS.contains(&req.path());

        // RequestTrace put the trace id into extensions before us.
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            let status = status.as_u16();
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

            if status >= 500 {
                error!(%method, %path, status, elapsed_ms, %trace_id, "request completed");
            } else if status >= 400 {
                warn!(%method, %path, status, elapsed_ms, %trace_id, "request completed");
            } else if quiet {
                debug!(%method, %path, status, elapsed_ms, %trace_id, "request completed");
            } else {
                info!(%method, %path, status, elapsed_ms, %trace_id, "request completed");
            }

            result
        })
    }
}
