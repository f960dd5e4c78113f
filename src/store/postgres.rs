use async_trait::async_trait;
use sqlx::PgPool;

use super::Store;
use crate::error::AppError;
use crate::models::{NewProject, NewTask, NewUser, Project, Task, TaskStatus, User};

const USER_COLUMNS: &str = "id, email, username, password_hash, role";

const PROJECT_SELECT: &str = "SELECT p.id, p.title, p.description, p.owner_id, u.username AS owner \
     FROM projects p JOIN users u ON u.id = p.owner_id";

const TASK_SELECT: &str = "SELECT t.id, t.title, t.description, t.status, t.project_id, p.title AS project \
     FROM tasks t JOIN projects p ON p.id = t.project_id";

/// `Store` backed by PostgreSQL. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, username, password_hash, role) VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    let field = match db.constraint() {
                        Some(constraint) if constraint.contains("username") => "username",
                        _ => "email",
                    };
                    return AppError::Conflict(format!("User with this {} already exists", field));
                }
            }
            e.into()
        })
    }

    async fn insert_project(&self, project: NewProject) -> Result<i32, AppError> {
        let (id,) = sqlx::query_as::<_, (i32,)>(
            "INSERT INTO projects (title, description, owner_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(&format!("{} ORDER BY p.id", PROJECT_SELECT))
            .fetch_all(&self.pool)
            .await?;
        Ok(projects)
    }

    async fn find_project(&self, id: i32) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(&format!("{} WHERE p.id = $1", PROJECT_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    async fn update_project(&self, id: i32, title: &str, description: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE projects SET title = $1, description = $2 WHERE id = $3")
            .bind(title)
            .bind(description)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }
        Ok(())
    }

    async fn delete_project(&self, id: i32) -> Result<bool, AppError> {
        // tasks.project_id is declared ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_task(&self, task: NewTask) -> Result<i32, AppError> {
        sqlx::query_as::<_, (i32,)>(
            "INSERT INTO tasks (title, description, status, project_id) VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(TaskStatus::ToDo)
        .bind(task.project_id)
        .fetch_one(&self.pool)
        .await
        .map(|(id,)| id)
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_foreign_key_violation() {
                    return AppError::NotFound("Project not found".into());
                }
            }
            e.into()
        })
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(&format!("{} ORDER BY t.id", TASK_SELECT))
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn find_task(&self, id: i32) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!("{} WHERE t.id = $1", TASK_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn update_task_status(&self, id: i32, status: TaskStatus) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE tasks SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_task(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
