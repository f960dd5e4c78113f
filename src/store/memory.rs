use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use super::Store;
use crate::error::AppError;
use crate::models::{NewProject, NewTask, NewUser, Project, Task, TaskStatus, User};

#[derive(Debug, Clone)]
struct ProjectRow {
    title: String,
    description: String,
    owner_id: i32,
}

#[derive(Debug, Clone)]
struct TaskRow {
    title: String,
    description: String,
    status: TaskStatus,
    project_id: i32,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    projects: BTreeMap<i32, ProjectRow>,
    tasks: BTreeMap<i32, TaskRow>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn project(&self, id: i32) -> Option<Project> {
        let row = self.projects.get(&id)?;
        let owner = self
            .users
            .get(&row.owner_id)
            .map(|u| u.username.clone())
            .unwrap_or_default();
        Some(Project {
            id,
            title: row.title.clone(),
            description: row.description.clone(),
            owner_id: row.owner_id,
            owner,
        })
    }

    fn task(&self, id: i32) -> Option<Task> {
        let row = self.tasks.get(&id)?;
        let project = self
            .projects
            .get(&row.project_id)
            .map(|p| p.title.clone())
            .unwrap_or_default();
        Some(Task {
            id,
            title: row.title.clone(),
            description: row.description.clone(),
            status: row.status,
            project_id: row.project_id,
            project,
        })
    }
}

/// In-process `Store` with the same contract as the Postgres backend:
/// unique emails and usernames, and project deletion cascading to tasks.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.lock().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("User with this email already exists".into()));
        }
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(AppError::Conflict("User with this username already exists".into()));
        }

        let id = tables.next_id();
        let user = User {
            id,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn insert_project(&self, project: NewProject) -> Result<i32, AppError> {
        let mut tables = self.tables.lock().await;
        let id = tables.next_id();
        tables.projects.insert(
            id,
            ProjectRow {
                title: project.title,
                description: project.description,
                owner_id: project.owner_id,
            },
        );
        Ok(id)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .projects
            .keys()
            .filter_map(|id| tables.project(*id))
            .collect())
    }

    async fn find_project(&self, id: i32) -> Result<Option<Project>, AppError> {
        Ok(self.tables.lock().await.project(id))
    }

    async fn update_project(&self, id: i32, title: &str, description: &str) -> Result<(), AppError> {
        let mut tables = self.tables.lock().await;
        let row = tables
            .projects
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;
        row.title = title.to_string();
        row.description = description.to_string();
        Ok(())
    }

    async fn delete_project(&self, id: i32) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;
        if tables.projects.remove(&id).is_none() {
            return Ok(false);
        }
        tables.tasks.retain(|_, task| task.project_id != id);
        Ok(true)
    }

    async fn insert_task(&self, task: NewTask) -> Result<i32, AppError> {
        let mut tables = self.tables.lock().await;
        if !tables.projects.contains_key(&task.project_id) {
            return Err(AppError::NotFound("Project not found".into()));
        }
        let id = tables.next_id();
        tables.tasks.insert(
            id,
            TaskRow {
                title: task.title,
                description: task.description,
                status: TaskStatus::ToDo,
                project_id: task.project_id,
            },
        );
        Ok(id)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.tasks.keys().filter_map(|id| tables.task(*id)).collect())
    }

    async fn find_task(&self, id: i32) -> Result<Option<Task>, AppError> {
        Ok(self.tables.lock().await.task(id))
    }

    async fn update_task_status(&self, id: i32, status: TaskStatus) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;
        match tables.tasks.get_mut(&id) {
            Some(task) => {
                task.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_task(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.tables.lock().await.tasks.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    async fn seed_admin(store: &MemoryStore) -> User {
        store
            .insert_user(NewUser {
                email: "admin@x.com".to_string(),
                username: "admin".to_string(),
                password_hash: "hash".to_string(),
                role: Role::Admin,
            })
            .await
            .unwrap()
    }

    #[actix_rt::test]
    async fn test_unique_email_and_username() {
        let store = MemoryStore::new();
        seed_admin(&store).await;

        let same_email = store
            .insert_user(NewUser {
                email: "admin@x.com".to_string(),
                username: "other".to_string(),
                password_hash: "hash".to_string(),
                role: Role::Member,
            })
            .await;
        assert!(matches!(same_email, Err(AppError::Conflict(_))));

        let same_username = store
            .insert_user(NewUser {
                email: "other@x.com".to_string(),
                username: "admin".to_string(),
                password_hash: "hash".to_string(),
                role: Role::Member,
            })
            .await;
        assert!(matches!(same_username, Err(AppError::Conflict(_))));
    }

    #[actix_rt::test]
    async fn test_delete_project_cascades_to_tasks() {
        let store = MemoryStore::new();
        let admin = seed_admin(&store).await;

        let keep = store
            .insert_project(NewProject {
                title: "Keep".to_string(),
                description: "d".to_string(),
                owner_id: admin.id,
            })
            .await
            .unwrap();
        let doomed = store
            .insert_project(NewProject {
                title: "Doomed".to_string(),
                description: "d".to_string(),
                owner_id: admin.id,
            })
            .await
            .unwrap();

        for project_id in [keep, doomed, doomed] {
            store
                .insert_task(NewTask {
                    title: "t".to_string(),
                    description: "d".to_string(),
                    project_id,
                })
                .await
                .unwrap();
        }

        assert!(store.delete_project(doomed).await.unwrap());
        assert!(!store.delete_project(doomed).await.unwrap());

        let remaining = store.list_tasks().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|t| t.project_id == keep));
    }

    #[actix_rt::test]
    async fn test_task_requires_existing_project() {
        let store = MemoryStore::new();
        let result = store
            .insert_task(NewTask {
                title: "t".to_string(),
                description: "d".to_string(),
                project_id: 42,
            })
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[actix_rt::test]
    async fn test_views_resolve_owner_and_project_names() {
        let store = MemoryStore::new();
        let admin = seed_admin(&store).await;
        let project_id = store
            .insert_project(NewProject {
                title: "P1".to_string(),
                description: "d".to_string(),
                owner_id: admin.id,
            })
            .await
            .unwrap();
        let task_id = store
            .insert_task(NewTask {
                title: "T1".to_string(),
                description: "d".to_string(),
                project_id,
            })
            .await
            .unwrap();

        let project = store.find_project(project_id).await.unwrap().unwrap();
        assert_eq!(project.owner, "admin");

        store.update_project(project_id, "Renamed", "d").await.unwrap();
        let task = store.find_task(task_id).await.unwrap().unwrap();
        assert_eq!(task.project, "Renamed");
        assert_eq!(task.status, TaskStatus::ToDo);
    }
}
