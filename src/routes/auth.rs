use crate::{
    auth::{
        hash_password, issue_token, verify_password, LoginRequest, RegisterRequest, TokenResponse,
    },
    config::JwtConfig,
    db::users,
    error::AppError,
    models::UserProfile,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Register a new user
///
/// Creates the account and returns its public profile. A second registration
/// with the same email is rejected with 400 and creates nothing.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    if users::find_by_email(&pool, &register_data.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("email already registered".into()));
    }

    let password_hash = hash_password(&register_data.password)?;

    // The unique constraint still guards against a concurrent registration.
    let user = users::insert_user(
        &pool,
        &register_data.username,
        &register_data.email,
        &password_hash,
    )
    .await?;

    log::info!("registered user {}", user.id);
    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}

/// Login user
///
/// Checks the credentials and returns a signed bearer token.
/// Unknown emails and wrong passwords get the same 400 response.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    jwt: web::Data<JwtConfig>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = users::find_by_email(&pool, &login_data.email)
        .await?
        .ok_or_else(|| AppError::BadRequest(INVALID_CREDENTIALS.into()))?;

    if !verify_password(&login_data.password, &user.password_hash) {
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
    }

    let token = issue_token(user.id, &jwt.secret, jwt.ttl())?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
