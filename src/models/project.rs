use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A project together with its owner's display name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, FromRow)]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Identifier of the admin who created the project. Never reassigned.
    pub owner_id: i32,
    /// Username of the owner.
    pub owner: String,
}

/// Request body for creating a project.
///
/// Missing fields deserialize as empty strings so that they surface as
/// validation errors rather than parse failures.
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectInput {
    #[serde(default)]
    #[validate(length(min = 1, max = 255, message = "Title and description are required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Title and description are required"))]
    pub description: String,
}

/// Partial update of a project. Absent or empty fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProjectChanges {
    #[validate(length(max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ProjectChanges {
    /// Applies the supplied fields on top of `project`.
    pub fn apply_to(self, project: &mut Project) {
        if let Some(title) = self.title.filter(|t| !t.is_empty()) {
            project.title = title;
        }
        if let Some(description) = self.description.filter(|d| !d.is_empty()) {
            project.description = description;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub owner_id: i32,
}
