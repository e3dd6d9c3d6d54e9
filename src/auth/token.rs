use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::DEFAULT_JWT_EXP_HOURS;
use crate::error::AppError;

/// The only signing algorithm tokens may carry.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject of the token: the user's id, as a decimal string.
    #[serde(default)]
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Claims for `user_id`, valid from `now` for `ttl`.
    /// A non-positive `ttl` is replaced with the 24 hour default.
    ///
    /// Returns `AppError::InternalServerError` if the expiry does not fit in a timestamp.
    pub fn new(user_id: i64, ttl: Duration, now: DateTime<Utc>) -> Result<Self, AppError> {
        let ttl = if ttl > Duration::zero() {
            ttl
        } else {
            Duration::hours(DEFAULT_JWT_EXP_HOURS)
        };

        let exp = now.checked_add_signed(ttl).ok_or_else(|| {
            log::error!("token lifetime {} overflows the expiry timestamp", ttl);
            AppError::InternalServerError("could not create token".into())
        })?;

        Ok(Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }
}

/// Why a presented token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    Malformed,
    UnexpectedAlgorithm,
    InvalidSignature,
    Expired,
    InvalidSubject,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match self {
            AuthError::Malformed => "malformed",
            AuthError::UnexpectedAlgorithm => "unexpected algorithm",
            AuthError::InvalidSignature => "invalid signature",
            AuthError::Expired => "expired",
            AuthError::InvalidSubject => "invalid subject",
        };
        f.write_str(reason)
    }
}

impl std::error::Error for AuthError {}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        match error.kind() {
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::InvalidAlgorithm => AuthError::UnexpectedAlgorithm,
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::Malformed,
        }
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Generates a signed token for `user_id` that expires after `ttl`.
///
/// # Returns
/// The compact `header.payload.signature` string.
/// Returns `AppError::InternalServerError` if signing fails.
pub fn issue_token(user_id: i64, secret: &str, ttl: Duration) -> Result<String, AppError> {
    issue_token_at(user_id, secret, ttl, Utc::now())
}

pub fn issue_token_at(
    user_id: i64,
    secret: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    let claims = Claims::new(user_id, ttl, now)?;

    encode(
        &Header::new(TOKEN_ALGORITHM),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        log::error!("failed to sign token: {}", e);
        AppError::InternalServerError("could not create token".into())
    })
}

/// Verifies a token against `secret` and returns the user id it was issued for.
pub fn verify_token(token: &str, secret: &str) -> Result<i64, AuthError> {
    verify_token_at(token, secret, Utc::now())
}

/// Checks, in order: structure, algorithm, signature, expiry (`exp > now`)
/// and finally that the subject is a non-negative integer id.
pub fn verify_token_at(token: &str, secret: &str, now: DateTime<Utc>) -> Result<i64, AuthError> {
    let header = token_header(token)?;
    if header.alg != "HS256" {
        return Err(AuthError::UnexpectedAlgorithm);
    }

    // Expiry is compared against `now` below rather than the wall clock.
    let mut validation = Validation::new(TOKEN_ALGORITHM);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?
    .claims;

    if claims.exp <= now.timestamp() {
        return Err(AuthError::Expired);
    }

    claims
        .sub
        .parse::<u64>()
        .ok()
        .and_then(|id| i64::try_from(id).ok())
        .ok_or(AuthError::InvalidSubject)
}

/// Splits the token and decodes its header and claims without checking the
/// signature, so structural problems are reported before signature ones.
fn token_header(token: &str) -> Result<RawHeader, AuthError> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::Malformed);
    };

    let header: RawHeader = decode_segment(header)?;
    let _claims: Claims = decode_segment(payload)?;
    Ok(header)
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| AuthError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| AuthError::Malformed)
}
