//! Persistence boundary.
//!
//! Services talk to storage only through the [`Store`] trait. [`PgStore`] is
//! the production backend; [`MemoryStore`] keeps everything in process and is
//! what the test suite runs against.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{NewProject, NewTask, NewUser, Project, Task, TaskStatus, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>, AppError>;

    /// Inserts a user. Fails with `Conflict` when the email or username is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError>;

    async fn insert_project(&self, project: NewProject) -> Result<i32, AppError>;

    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;

    async fn find_project(&self, id: i32) -> Result<Option<Project>, AppError>;

    async fn update_project(&self, id: i32, title: &str, description: &str) -> Result<(), AppError>;

    /// Deletes a project and every task that belongs to it.
    /// Returns `false` when no such project exists.
    async fn delete_project(&self, id: i32) -> Result<bool, AppError>;

    /// Inserts a task in status `To Do`. Fails with `NotFound` when the
    /// project does not exist.
    async fn insert_task(&self, task: NewTask) -> Result<i32, AppError>;

    async fn list_tasks(&self) -> Result<Vec<Task>, AppError>;

    async fn find_task(&self, id: i32) -> Result<Option<Task>, AppError>;

    /// Returns `false` when no such task exists.
    async fn update_task_status(&self, id: i32, status: TaskStatus) -> Result<bool, AppError>;

    /// Returns `false` when no such task exists.
    async fn delete_task(&self, id: i32) -> Result<bool, AppError>;
}
