use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::fmt;
use std::future::{ready, Ready};

use crate::error::AppError;

/// The identity established by `AuthMiddleware` for the current request.
///
/// The middleware inserts this exact type into the request extensions, and
/// handlers on protected routes take it as an argument. Task queries accept it
/// as their owner parameter, so a task's owner can only come from a verified token.
///
/// If the value is missing (e.g. the route was mounted outside the protected
/// scope) extraction fails with `AppError::Unauthorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUserId(pub i64);

impl AuthenticatedUserId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AuthenticatedUserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromRequest for AuthenticatedUserId {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUserId>().copied() {
            Some(user_id) => ready(Ok(user_id)),
            None => {
                log::warn!("no authenticated user on protected route {}", req.path());
                ready(Err(AppError::Unauthorized("authorization required".into()).into()))
            }
        }
    }
}
