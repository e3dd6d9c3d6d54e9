use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderMap},
    Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::sync::Arc;

use crate::auth::extractors::AuthenticatedUserId;
use crate::auth::token::verify_token;
use crate::error::AppError;

/// Gate for protected routes.
///
/// Reads `Authorization: Bearer <token>`, verifies the token with the secret the
/// middleware was built with and stores the result as an `AuthenticatedUserId`
/// in the request extensions. Requests without a usable token are answered with
/// 401 and never reach the wrapped service.
#[derive(Clone)]
pub struct AuthMiddleware {
    secret: Arc<str>,
}

impl AuthMiddleware {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Arc::from(secret),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            secret: Arc::clone(&self.secret),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    secret: Arc<str>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let verified = bearer_token(req.headers()).map(|token| verify_token(token, &self.secret));
        let rejection = match verified {
            Some(result) => match result {
                Ok(user_id) => {
                    req.extensions_mut().insert(AuthenticatedUserId(user_id));
                    let fut = self.service.call(req);
                    return Box::pin(async move {
                        fut.await.map(ServiceResponse::map_into_left_body)
                    });
                }
                Err(err) => {
                    log::debug!("rejected token on {}: {}", req.path(), err);
                    AppError::from(err)
                }
            },
            None => {
                log::debug!("missing bearer token on {}", req.path());
                AppError::Unauthorized("authorization required".into())
            }
        };

        let response = req.into_response(rejection.error_response());
        Box::pin(ready(Ok(response.map_into_right_body())))
    }
}

/// The token part of an `Authorization: Bearer <token>` header, if present.
/// Exactly one space after the scheme; any other whitespace rejects the header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty() && !token.contains(char::is_whitespace))
}
