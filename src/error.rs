//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every handler returns `Result<_, AppError>`, so each failure ends up as a JSON body of
//! the form `{"error": "<message>"}` with the status code of its variant.
//!
//! `AppError` implements `actix_web::error::ResponseError` and provides `From`
//! conversions for `sqlx::Error`, `validator::ValidationErrors` and the token
//! verifier's `AuthError`, allowing for easy conversion using the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::token::AuthError;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing, malformed or expired credentials (HTTP 401).
    Unauthorized(String),
    /// A malformed request, such as an unparseable path segment (HTTP 400).
    BadRequest(String),
    /// The resource does not exist or is owned by someone else (HTTP 404).
    NotFound(String),
    /// A unique field is already taken (HTTP 400 in this API).
    Conflict(String),
    /// An unexpected server-side error (HTTP 500).
    /// The message is returned to the client, so it must not carry internal detail.
    InternalServerError(String),
    /// An error originating from database operations (HTTP 500).
    /// The detail is logged; clients only ever see a generic message.
    DatabaseError(String),
    /// Input that deserialized but failed validation (HTTP 400).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::Conflict(_) | AppError::ValidationError(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::InternalServerError(msg)
            | AppError::ValidationError(msg) => msg.as_str(),
            AppError::DatabaseError(detail) => {
                log::error!("database error: {}", detail);
                "database error"
            }
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes `NotFound` and a unique-constraint violation becomes
/// `Conflict`; everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("record not found".into()),
            sqlx::Error::Database(ref db_error) if db_error.is_unique_violation() => {
                match db_error.constraint() {
                    Some("users_email_key") => {
                        AppError::Conflict("email already registered".into())
                    }
                    _ => AppError::Conflict("resource already exists".into()),
                }
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Every verifier failure is reported to the client the same way.
impl From<AuthError> for AppError {
    fn from(_: AuthError) -> AppError {
        AppError::Unauthorized("invalid token".into())
    }
}
