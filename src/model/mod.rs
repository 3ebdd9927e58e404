//! Board domain models
//!
//! - `category`: top-level grouping of projects
//! - `project`: grouping of tasks under a category
//! - `task`: unit of work with a due date, priority and completion state
//! - `dates`: local clock helpers and lenient date parsing

mod category;
pub mod dates;
mod project;
mod task;

pub use category::{Category, CategoryPatch, NewCategory};
pub use dates::{local_date_today, local_now};
pub use project::{NewProject, Project, ProjectPatch};
pub use task::{NewTask, Priority, Task, TaskPatch};

pub const CATEGORY_ID_PREFIX: &str = "cat";
pub const PROJECT_ID_PREFIX: &str = "proj";
pub const TASK_ID_PREFIX: &str = "task";

/// Generate a unique id such as `task_01890a5d...`.
///
/// UUIDv7 keeps ids roughly sortable by creation time.
pub fn generate_id(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::now_v7().simple())
}
