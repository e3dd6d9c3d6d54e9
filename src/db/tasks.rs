use sqlx::PgPool;

use crate::auth::AuthenticatedUserId;
use crate::error::AppError;
use crate::models::Task;

const TASK_COLUMNS: &str = "id, description, completed, user_id, created_at, updated_at";

/// Creates a task owned by `owner`. The owner never comes from the request body.
pub async fn create_task(
    pool: &PgPool,
    owner: AuthenticatedUserId,
    description: &str,
    completed: bool,
) -> Result<Task, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (description, completed, user_id) VALUES ($1, $2, $3) RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(description)
    .bind(completed)
    .bind(owner.get())
    .fetch_one(pool)
    .await?;

    Ok(task)
}

pub async fn list_tasks(pool: &PgPool, owner: AuthenticatedUserId) -> Result<Vec<Task>, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY id",
        TASK_COLUMNS
    ))
    .bind(owner.get())
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

pub async fn find_task(
    pool: &PgPool,
    owner: AuthenticatedUserId,
    id: i64,
) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = $1 AND user_id = $2",
        TASK_COLUMNS
    ))
    .bind(id)
    .bind(owner.get())
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// Replaces the description and, when given, the completion flag.
/// `completed: None` keeps whatever is stored.
pub async fn update_task(
    pool: &PgPool,
    owner: AuthenticatedUserId,
    id: i64,
    description: &str,
    completed: Option<bool>,
) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "UPDATE tasks
         SET description = $1, completed = COALESCE($2, completed), updated_at = NOW()
         WHERE id = $3 AND user_id = $4
         RETURNING {}",
        TASK_COLUMNS
    ))
    .bind(description)
    .bind(completed)
    .bind(id)
    .bind(owner.get())
    .fetch_optional(pool)
    .await?;

    Ok(task)
}

/// Returns `false` when nothing matched, i.e. the task is absent or not owned by `owner`.
pub async fn delete_task(
    pool: &PgPool,
    owner: AuthenticatedUserId,
    id: i64,
) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner.get())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
