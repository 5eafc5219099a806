//! Per-request tracing span.
//!
//! Every event emitted while a request is handled sits inside a `request`
//! span with `trace_id`, `method` and `path`. The span also reserves an empty
//! `subject` field that `AccessGate` fills once a credential has been
//! accepted, so handler logs name the caller without each handler doing it.
//!
//! The trace id comes from the request extensions, so `RequestTrace` has to
//! be registered after this middleware (actix runs the last `wrap` first).
//! `StructuredLogger` goes inside, so its completion event carries the span:
//!
//! App::new()
//!     .wrap(StructuredLogger)
//!     .wrap(TraceSpan)
//!     .wrap(RequestTrace)

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::field::Empty;
use tracing::{info_span, Instrument};

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
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
        let span = {
            let extensions = req.extensions();
            let trace_id = extensions.get::<String>().map_or("unknown", String::as_str);
            info_span!(
                "request",
                trace_id = %trace_id,
                method = %req.method(),
                path = %req.path(),
                subject = Empty,
            )
        };

        // Inner middleware may do work in `call` itself, before the first poll
        let fut = span.in_scope(|| self.service.call(req));
        Box::pin(fut.instrument(span))
    }
}
