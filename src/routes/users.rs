use crate::{auth::AuthenticatedUserId, db::users, error::AppError, models::UserProfile};
use actix_web::{get, web, HttpResponse, Responder};
use sqlx::PgPool;

/// Profile of the authenticated user.
///
/// A valid token for an account that no longer exists yields 404.
#[get("/me")]
pub async fn me(
    pool: web::Data<PgPool>,
    user_id: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let user = users::find_by_id(&pool, user_id.get())
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".into()))?;

    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}
