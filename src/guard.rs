//! Authorization guard.
//!
//! A pure decision over (identity, requested action, target). It never touches
//! the store and never mutates anything; services call [`authorize`] before
//! writing.

use crate::auth::Identity;
use crate::error::AppError;
use crate::models::{Capability, Project};

/// Something a caller asks to do, carrying the target where the decision
/// depends on it.
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    CreateProject,
    ViewProject,
    UpdateProject(&'a Project),
    DeleteProject(&'a Project),
    CreateTask,
    ViewTask,
    UpdateTaskStatus,
    DeleteTask,
}

impl Action<'_> {
    pub fn capability(&self) -> Capability {
        match self {
            Action::ViewProject | Action::ViewTask => Capability::View,
            Action::CreateProject | Action::UpdateProject(_) | Action::DeleteProject(_) => {
                Capability::ManageProjects
            }
            Action::CreateTask | Action::DeleteTask => Capability::ManageTasks,
            Action::UpdateTaskStatus => Capability::UpdateTaskStatus,
        }
    }

    fn denial(&self) -> &'static str {
        match self {
            Action::CreateProject => "Only admins can create projects",
            Action::UpdateProject(_) => "Only the project creator (Admin) can update this project",
            Action::DeleteProject(_) => "Only the project creator (Admin) can delete this project",
            Action::CreateTask => "Only admins can create tasks",
            Action::UpdateTaskStatus => "Only members can update task statuses",
            Action::DeleteTask => "Only admins can delete tasks",
            Action::ViewProject | Action::ViewTask => "You do not have permission to view this resource",
        }
    }
}

/// Allows or denies `action` for `identity`. Denial is `AppError::Forbidden`.
pub fn authorize(identity: &Identity, action: &Action<'_>) -> Result<(), AppError> {
    let owner_ok = match action {
        Action::UpdateProject(project) | Action::DeleteProject(project) => {
            project.owner_id == identity.user_id
        }
        _ => true,
    };

    if identity.role.can(action.capability()) && owner_ok {
        Ok(())
    } else {
        log::warn!(
            "Denied {:?} for user {} with role {}",
            action,
            identity.user_id,
            identity.role.as_str()
        );
        Err(AppError::Forbidden(action.denial().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    const ADMIN: Identity = Identity {
        user_id: 1,
        role: Role::Admin,
    };
    const OTHER_ADMIN: Identity = Identity {
        user_id: 2,
        role: Role::Admin,
    };
    const MEMBER: Identity = Identity {
        user_id: 3,
        role: Role::Member,
    };

    fn project_owned_by(owner_id: i32) -> Project {
        Project {
            id: 10,
            title: "P1".to_string(),
            description: "d".to_string(),
            owner_id,
            owner: "owner".to_string(),
        }
    }

    fn allowed(identity: &Identity, action: Action<'_>) -> bool {
        authorize(identity, &action).is_ok()
    }

    #[test]
    fn test_role_only_actions() {
        let cases = [
            (Action::CreateProject, true, false),
            (Action::ViewProject, true, true),
            (Action::CreateTask, true, false),
            (Action::ViewTask, true, true),
            (Action::UpdateTaskStatus, false, true),
            (Action::DeleteTask, true, false),
        ];

        for (action, admin, member) in cases {
            assert_eq!(allowed(&ADMIN, action), admin, "admin {:?}", action);
            assert_eq!(allowed(&MEMBER, action), member, "member {:?}", action);
        }
    }

    #[test]
    fn test_project_mutation_requires_admin_owner() {
        let project = project_owned_by(ADMIN.user_id);

        assert!(allowed(&ADMIN, Action::UpdateProject(&project)));
        assert!(allowed(&ADMIN, Action::DeleteProject(&project)));

        assert!(!allowed(&OTHER_ADMIN, Action::UpdateProject(&project)));
        assert!(!allowed(&OTHER_ADMIN, Action::DeleteProject(&project)));
    }

    #[test]
    fn test_member_owner_is_still_denied() {
        // Projects are only ever created by admins, but ownership alone is not enough.
        let project = project_owned_by(MEMBER.user_id);
        assert!(!allowed(&MEMBER, Action::UpdateProject(&project)));
        assert!(!allowed(&MEMBER, Action::DeleteProject(&project)));
    }

    #[test]
    fn test_denial_is_forbidden() {
        match authorize(&MEMBER, &Action::CreateProject) {
            Err(AppError::Forbidden(msg)) => assert_eq!(msg, "Only admins can create projects"),
            other => panic!("Expected Forbidden, got {:?}", other),
        }
    }
}
