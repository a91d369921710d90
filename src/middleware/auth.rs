use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::HeaderMap,
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

/// Authenticated caller identity, resolved from the headers the
/// mini-program hosting environment injects on every forwarded request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CallerIdentity {
    pub open_id: String,
    pub app_id: Option<String>,
    pub union_id: Option<String>,
}

/// Header names set by the hosting platform. They are trusted as-is:
/// the platform strips them from external traffic before forwarding.
const OPENID_HEADER: &str = "x-wx-openid";
const APPID_HEADER: &str = "x-wx-appid";
const UNIONID_HEADER: &str = "x-wx-unionid";

pub fn identity_from_headers(headers: &HeaderMap) -> Option<CallerIdentity> {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
    };

    Some(CallerIdentity {
        open_id: header_str(OPENID_HEADER)?,
        app_id: header_str(APPID_HEADER),
        union_id: header_str(UNIONID_HEADER),
    })
}

pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match identity_from_headers(req.headers()) {
            Some(identity) => {
                req.extensions_mut().insert(identity);

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res)
                })
            }
            None => Box::pin(async move {
                Err(actix_web::error::ErrorUnauthorized(
                    "Missing caller identity headers",
                ))
            }),
        }
    }
}
