pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::AppError;

/// Registers every `/api` route together with the body and query error
/// handlers. Wrap the enclosing scope in `AuthMiddleware`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(auth::register)
        .service(auth::login)
        .service(auth::refresh)
        .service(projects::list_projects)
        .service(projects::create_project)
        .service(projects::get_project)
        .service(projects::update_project)
        .service(projects::delete_project)
        .service(tasks::list_tasks)
        .service(tasks::create_task)
        .service(tasks::get_task)
        .service(tasks::update_task_status)
        .service(tasks::delete_task);
}

/// Malformed or missing JSON bodies become `400` with the usual error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Validation(format!("Invalid JSON data: {}", err)).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::Validation(format!("Invalid query parameters: {}", err)).into()
    })
}

pub(crate) fn message(text: &str) -> serde_json::Value {
    json!({ "message": text })
}

pub(crate) fn ok_message(text: &str) -> HttpResponse {
    HttpResponse::Ok().json(message(text))
}

pub(crate) fn require_id(id: Option<i32>, what: &str) -> Result<i32, AppError> {
    id.ok_or_else(|| AppError::Validation(format!("{} ID is required", what)))
}
