use validator::Validate;

use crate::auth::Identity;
use crate::error::AppError;
use crate::guard::{authorize, Action};
use crate::models::{NewTask, Task, TaskInput, TaskStatus};
use crate::store::Store;

fn not_found() -> AppError {
    AppError::NotFound("Task not found".into())
}

/// Creates a task in status `To Do` under an existing project and returns its id.
pub async fn create(store: &dyn Store, identity: &Identity, input: TaskInput) -> Result<i32, AppError> {
    authorize(identity, &Action::CreateTask)?;
    input.validate()?;
    let project_id = input.project_id.ok_or_else(|| {
        AppError::Validation("Title, description, and project_id are required".into())
    })?;

    if store.find_project(project_id).await?.is_none() {
        return Err(AppError::NotFound("Project not found".into()));
    }

    let id = store
        .insert_task(NewTask {
            title: input.title,
            description: input.description,
            project_id,
        })
        .await?;

    log::info!("User {} created task {} in project {}", identity.user_id, id, project_id);
    Ok(id)
}

pub async fn list(store: &dyn Store, identity: &Identity) -> Result<Vec<Task>, AppError> {
    authorize(identity, &Action::ViewTask)?;
    store.list_tasks().await
}

pub async fn get(store: &dyn Store, identity: &Identity, id: i32) -> Result<Task, AppError> {
    authorize(identity, &Action::ViewTask)?;
    store.find_task(id).await?.ok_or_else(not_found)
}

/// Moves a task to `new_status`. Any status may follow any other.
///
/// A missing task is reported before the role check, and the role check
/// before the status value.
pub async fn update_status(
    store: &dyn Store,
    identity: &Identity,
    id: i32,
    new_status: &str,
) -> Result<TaskStatus, AppError> {
    let task = store.find_task(id).await?.ok_or_else(not_found)?;
    authorize(identity, &Action::UpdateTaskStatus)?;
    let status: TaskStatus = new_status.parse()?;

    if !store.update_task_status(task.id, status).await? {
        return Err(not_found());
    }

    log::info!("User {} moved task {} to {}", identity.user_id, id, status);
    Ok(status)
}

pub async fn delete(store: &dyn Store, identity: &Identity, id: i32) -> Result<(), AppError> {
    let task = store.find_task(id).await?.ok_or_else(not_found)?;
    authorize(identity, &Action::DeleteTask)?;

    if !store.delete_task(task.id).await? {
        return Err(not_found());
    }

    log::info!("User {} deleted task {}", identity.user_id, id);
    Ok(())
}
