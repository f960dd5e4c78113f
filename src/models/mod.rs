pub mod project;
pub mod task;
pub mod user;

pub use project::{NewProject, Project, ProjectChanges, ProjectInput};
pub use task::{NewTask, Task, TaskInput, TaskStatus};
pub use user::{Capability, NewUser, Role, User, UserSummary};
