use crate::{
    auth::AuthenticatedUserId,
    db::tasks,
    error::AppError,
    models::{CreateTaskRequest, TaskId, TaskList, UpdateTaskRequest},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

fn task_not_found() -> AppError {
    AppError::NotFound("task not found".into())
}

/// Lists every task owned by the authenticated user, oldest first.
///
/// ## Responses:
/// - `200 OK`: `{"tasks": [...]}`
/// - `401 Unauthorized`: missing or invalid token.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    owner: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let tasks = tasks::list_tasks(&pool, owner).await?;
    Ok(HttpResponse::Ok().json(TaskList { tasks }))
}

/// Creates a new task for the authenticated user.
///
/// ## Request Body:
/// - `description`: required, non-empty.
/// - `status` (optional): completion flag, defaults to `false`.
///
/// ## Responses:
/// - `200 OK`: `{"id": <new task id>}`
/// - `400 Bad Request`: missing or empty description.
/// - `401 Unauthorized`: missing or invalid token.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    owner: AuthenticatedUserId,
    task_data: web::Json<CreateTaskRequest>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = tasks::create_task(
        &pool,
        owner,
        &task_data.description,
        task_data.completed.unwrap_or(false),
    )
    .await?;

    log::debug!("user {} created task {}", owner, task.id);
    Ok(HttpResponse::Ok().json(TaskId { id: task.id }))
}

/// Retrieves one of the authenticated user's tasks.
///
/// ## Responses:
/// - `200 OK`: the task.
/// - `400 Bad Request`: the id is not a number.
/// - `404 Not Found`: no such task, or it belongs to someone else.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    owner: AuthenticatedUserId,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let task = tasks::find_task(&pool, owner, task_id.into_inner())
        .await?
        .ok_or_else(task_not_found)?;

    Ok(HttpResponse::Ok().json(task))
}

/// Updates one of the authenticated user's tasks.
///
/// `description` is replaced. `status` is only changed when present in the
/// body; leaving it out keeps the current value.
///
/// ## Responses:
/// - `200 OK`: `{"id": <task id>}`
/// - `400 Bad Request`: bad id or invalid body.
/// - `404 Not Found`: no such task, or it belongs to someone else.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    owner: AuthenticatedUserId,
    task_id: web::Path<i64>,
    task_data: web::Json<UpdateTaskRequest>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = tasks::update_task(
        &pool,
        owner,
        task_id.into_inner(),
        &task_data.description,
        task_data.completed,
    )
    .await?
    .ok_or_else(task_not_found)?;

    Ok(HttpResponse::Ok().json(TaskId { id: task.id }))
}

/// Deletes one of the authenticated user's tasks.
///
/// ## Responses:
/// - `200 OK`: `{"message": "task deleted"}`
/// - `404 Not Found`: no such task, or it belongs to someone else.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    owner: AuthenticatedUserId,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    if !tasks::delete_task(&pool, owner, task_id.into_inner()).await? {
        return Err(task_not_found());
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "task deleted" })))
}
