use validator::Validate;

use crate::auth::Identity;
use crate::error::AppError;
use crate::guard::{authorize, Action};
use crate::models::{NewProject, Project, ProjectChanges, ProjectInput};
use crate::store::Store;

fn not_found() -> AppError {
    AppError::NotFound("Project not found".into())
}

/// Creates a project owned by the requesting admin and returns its id.
pub async fn create(store: &dyn Store, identity: &Identity, input: ProjectInput) -> Result<i32, AppError> {
    authorize(identity, &Action::CreateProject)?;
    input.validate()?;

    let id = store
        .insert_project(NewProject {
            title: input.title,
            description: input.description,
            owner_id: identity.user_id,
        })
        .await?;

    log::info!("User {} created project {}", identity.user_id, id);
    Ok(id)
}

pub async fn list(store: &dyn Store, identity: &Identity) -> Result<Vec<Project>, AppError> {
    authorize(identity, &Action::ViewProject)?;
    store.list_projects().await
}

pub async fn get(store: &dyn Store, identity: &Identity, id: i32) -> Result<Project, AppError> {
    authorize(identity, &Action::ViewProject)?;
    store.find_project(id).await?.ok_or_else(not_found)
}

/// Applies the supplied fields. Only the admin who owns the project may do this.
pub async fn update(
    store: &dyn Store,
    identity: &Identity,
    id: i32,
    changes: ProjectChanges,
) -> Result<Project, AppError> {
    let mut project = store.find_project(id).await?.ok_or_else(not_found)?;
    authorize(identity, &Action::UpdateProject(&project))?;
    changes.validate()?;

    changes.apply_to(&mut project);
    store
        .update_project(project.id, &project.title, &project.description)
        .await?;

    log::info!("User {} updated project {}", identity.user_id, id);
    Ok(project)
}

/// Deletes the project and, with it, every task it owns.
pub async fn delete(store: &dyn Store, identity: &Identity, id: i32) -> Result<(), AppError> {
    let project = store.find_project(id).await?.ok_or_else(not_found)?;
    authorize(identity, &Action::DeleteProject(&project))?;

    if !store.delete_project(project.id).await? {
        return Err(not_found());
    }

    log::info!("User {} deleted project {}", identity.user_id, id);
    Ok(())
}
