//! Access gate middleware
//!
//! Wraps one route group. Every request must carry a valid, unexpired access
//! credential whose role is allowed for the group; otherwise the request is
//! answered here with a problem-details error and the handler never runs.
//! On success the `AuthenticatedIdentity` is stored in request extensions
//! for `CurrentUser` to pick up.

use std::rc::Rc;
use std::time::SystemTime;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::Span;

use crate::auth::claims::AuthenticatedIdentity;
use crate::auth::gate::{authenticate, authorize};
use crate::auth::permissions::RouteGroup;
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Copy)]
pub struct AccessGate {
    group: RouteGroup,
}

impl AccessGate {
    pub fn new(group: RouteGroup) -> Self {
        Self { group }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGateMiddleware {
            service: Rc::new(service),
            group: self.group,
        }))
    }
}

pub struct AccessGateMiddleware<S> {
    service: Rc<S>,
    group: RouteGroup,
}

impl<S, B> Service<ServiceRequest> for AccessGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let group = self.group;

        Box::pin(async move {
            match admit(&req, group) {
                Ok(identity) => {
                    Span::current().record("subject", identity.subject_id.as_str());
                    req.extensions_mut().insert(identity);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    security::access_denied(group, err.code(), req.path());
                    // Rendered here so the response carries the request's trace id
                    Ok(req.error_response(err).map_into_right_body())
                }
            }
        })
    }
}

fn admit(req: &ServiceRequest, group: RouteGroup) -> Result<AuthenticatedIdentity, AppError> {
    // Fail closed when the app was assembled without state
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available to access gate"))?;

    let identity = authenticate(req.headers(), SystemTime::now(), &state.security)?;
    authorize(&identity, group.allowed_roles())?;
    Ok(identity)
}
