use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::Identity,
    error::AppError,
    models::TaskInput,
    routes::{ok_message, require_id},
    services::tasks,
    store::Store,
};

#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    pub task_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub task_id: Option<i32>,
    pub new_status: Option<String>,
}

/// Lists every task with the title of its project. Any authenticated user.
#[get("/tasks/")]
pub async fn list_tasks(
    store: web::Data<dyn Store>,
    identity: Identity,
) -> Result<impl Responder, AppError> {
    let tasks = tasks::list(store.get_ref(), &identity).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task under an existing project. Admins only.
///
/// ## Responses:
/// - `201 Created`: `{message, task_id}`; the task starts in `To Do`.
/// - `400 Bad Request`: title, description or project_id missing.
/// - `403 Forbidden`: caller is not an admin.
/// - `404 Not Found`: the project does not exist.
#[post("/tasks/create/")]
pub async fn create_task(
    store: web::Data<dyn Store>,
    identity: Identity,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task_id = tasks::create(store.get_ref(), &identity, task_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Task created successfully",
        "task_id": task_id
    })))
}

/// Fetches one task by `?task_id=`.
#[get("/get_task/")]
pub async fn get_task(
    store: web::Data<dyn Store>,
    identity: Identity,
    query: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let task_id = require_id(query.task_id, "Task")?;
    let task = tasks::get(store.get_ref(), &identity, task_id).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Sets `?new_status=` on `?task_id=`. Members only.
///
/// ## Responses:
/// - `200 OK`: `{message}`.
/// - `400 Bad Request`: status is not one of `To Do`, `In Progress`, `Completed`.
/// - `403 Forbidden`: caller is not a member.
/// - `404 Not Found`: no such task.
#[patch("/tasks/update-status/")]
pub async fn update_task_status(
    store: web::Data<dyn Store>,
    identity: Identity,
    query: web::Query<StatusQuery>,
) -> Result<impl Responder, AppError> {
    let task_id = require_id(query.task_id, "Task")?;
    let new_status = query.new_status.as_deref().unwrap_or_default();

    tasks::update_status(store.get_ref(), &identity, task_id, new_status).await?;
    Ok(ok_message("Task status updated successfully"))
}

/// Deletes a task. Admins only.
#[delete("/tasks/delete/")]
pub async fn delete_task(
    store: web::Data<dyn Store>,
    identity: Identity,
    query: web::Query<TaskQuery>,
) -> Result<impl Responder, AppError> {
    let task_id = require_id(query.task_id, "Task")?;
    tasks::delete(store.get_ref(), &identity, task_id).await?;
    Ok(ok_message("Task deleted successfully"))
}
