use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role granted to a user at registration. Immutable afterwards.
/// Corresponds to the `user_role` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages the existence of projects and tasks.
    Admin,
    /// May only change task status.
    #[default]
    Member,
}

/// Coarse-grained abilities a role may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// List and fetch projects and tasks.
    View,
    /// Create, update and delete projects.
    ManageProjects,
    /// Create and delete tasks.
    ManageTasks,
    /// Move a task between statuses.
    UpdateTaskStatus,
}

impl Role {
    pub fn can(self, capability: Capability) -> bool {
        match (self, capability) {
            (_, Capability::View) => true,
            (Role::Admin, Capability::ManageProjects | Capability::ManageTasks) => true,
            (Role::Member, Capability::UpdateTaskStatus) => true,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }
}

/// A registered account as stored in the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// Fields required to insert a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// Public view of a user returned alongside login tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub email: String,
    pub username: String,
    pub role: Role,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}
