pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Registers every route. `/register`, `/login` and `/ping` are public;
/// everything under `/api` sits behind `gate`.
pub fn config(cfg: &mut web::ServiceConfig, gate: AuthMiddleware) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(health::ping)
        .service(auth::register)
        .service(auth::login)
        .service(
            web::scope("/api")
                .wrap(gate)
                .service(users::me)
                .service(
                    web::scope("/tasks")
                        .service(tasks::list_tasks)
                        .service(tasks::create_task)
                        .service(tasks::get_task)
                        .service(tasks::update_task)
                        .service(tasks::delete_task),
                ),
        );
}

/// Body deserialization failures (missing fields, wrong types) are validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

/// A task id that is not an integer is a 400, not a 404.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        log::debug!("rejected path {}: {}", req.path(), err);
        AppError::BadRequest("invalid task id".into()).into()
    })
}
