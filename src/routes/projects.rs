use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::Identity,
    error::AppError,
    models::{ProjectChanges, ProjectInput},
    routes::{ok_message, require_id},
    services::projects,
    store::Store,
};

#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    pub project_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectUpdateRequest {
    pub project_id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectDeleteRequest {
    pub project_id: Option<i32>,
}

/// Lists every project with its owner's username. Any authenticated user.
#[get("/projects/")]
pub async fn list_projects(
    store: web::Data<dyn Store>,
    identity: Identity,
) -> Result<impl Responder, AppError> {
    let projects = projects::list(store.get_ref(), &identity).await?;
    Ok(HttpResponse::Ok().json(projects))
}

/// Creates a project owned by the caller. Admins only.
///
/// ## Responses:
/// - `201 Created`: `{message, project_id}`.
/// - `400 Bad Request`: title or description missing.
/// - `403 Forbidden`: caller is not an admin.
#[post("/projects/create/")]
pub async fn create_project(
    store: web::Data<dyn Store>,
    identity: Identity,
    project_data: web::Json<ProjectInput>,
) -> Result<impl Responder, AppError> {
    let project_id = projects::create(store.get_ref(), &identity, project_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Project created successfully",
        "project_id": project_id
    })))
}

/// Fetches one project by `?project_id=`.
#[get("/get_project/")]
pub async fn get_project(
    store: web::Data<dyn Store>,
    identity: Identity,
    query: web::Query<ProjectQuery>,
) -> Result<impl Responder, AppError> {
    let project_id = require_id(query.project_id, "Project")?;
    let project = projects::get(store.get_ref(), &identity, project_id).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// Partially updates a project. Only its admin owner may do this.
///
/// ## Responses:
/// - `200 OK`: `{message}`.
/// - `403 Forbidden`: caller is not the admin who owns the project.
/// - `404 Not Found`: no such project.
#[put("/projects/update/")]
pub async fn update_project(
    store: web::Data<dyn Store>,
    identity: Identity,
    update_data: web::Json<ProjectUpdateRequest>,
) -> Result<impl Responder, AppError> {
    let ProjectUpdateRequest {
        project_id,
        title,
        description,
    } = update_data.into_inner();
    let project_id = require_id(project_id, "Project")?;

    projects::update(
        store.get_ref(),
        &identity,
        project_id,
        ProjectChanges { title, description },
    )
    .await?;

    Ok(ok_message("Project updated successfully"))
}

/// Deletes a project and all of its tasks. Only its admin owner may do this.
#[delete("/projects/delete/")]
pub async fn delete_project(
    store: web::Data<dyn Store>,
    identity: Identity,
    delete_data: web::Json<ProjectDeleteRequest>,
) -> Result<impl Responder, AppError> {
    let project_id = require_id(delete_data.project_id, "Project")?;
    projects::delete(store.get_ref(), &identity, project_id).await?;
    Ok(ok_message("Project deleted successfully"))
}
