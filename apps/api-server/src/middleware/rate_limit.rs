//! Rate limiting middleware.

use actix_web::{
    Error, ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use cyberprep_core::ports::{RateDecision, RateLimiter};

use super::{AppError, ClientKey};

/// Rate limiting middleware factory.
///
/// Every request is counted against `(client, path)` before it reaches the
/// handler; rejected requests get a `429` with a `Retry-After` header.
pub struct RateLimitMiddleware {
    limiter: Arc<dyn RateLimiter>,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Arc<dyn RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limiter: Arc<dyn RateLimiter>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let limiter = self.limiter.clone();

        Box::pin(async move {
            let client = ClientKey::from_http_request(req.request());
            let route = req.path().to_owned();

            match limiter.check(client.as_str(), &route).await {
                RateDecision::Allowed => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                RateDecision::Rejected { retry_after_secs } => {
                    tracing::warn!(
                        client = %client.as_str(),
                        route = %route,
                        retry_after_secs,
                        "Rate limit exceeded"
                    );

                    let response = AppError::TooManyRequests {
                        retry_after: retry_after_secs,
                    }
                    .error_response();

                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}
