//! Taskboard MCP Server Library
//!
//! A Model Context Protocol (MCP) server for personal task management. Work is
//! organized as categories, which hold projects, which hold tasks with due
//! dates, priorities and a manual order. Tasks due soon get reminders; the
//! dashboard and calendar views are derived from the stored tasks.
//!
//! # Architecture
//!
//! - **MCP Layer**: `TaskboardHandler` and the `handlers` module turn tool calls into planner calls
//! - **Domain Layer**: `planner` enforces references and cascades; `schedule`,
//!   `dashboard`, `calendar` and `notifications` derive views and reminders
//! - **Persistence Layer**: `repository` collections on top of the `storage` key-value file
//!
//! # Example
//!
//! ```no_run
//! use taskboard_mcp::{PlannerConfig, TaskboardHandler};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = TaskboardHandler::new(PlannerConfig::with_data_file("taskboard.toml"))?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod bootstrap;
pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod formatting;
pub mod handlers;
pub mod model;
pub mod notifications;
pub mod planner;
pub mod repository;
pub mod schedule;
pub mod storage;
pub mod validation;

use anyhow::Result;
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};

pub use bootstrap::InitialData;
pub use config::PlannerConfig;
pub use error::{StorageError, TaskboardError};
pub use model::{Category, Priority, Project, Task};
pub use planner::{BootstrapReport, CascadeReport, Planner};
pub use storage::Storage;

/// MCP Server handler for taskboard management
///
/// Every tool call goes through the `Planner`, which persists each change to
/// the store file before returning.
pub struct TaskboardHandler {
    pub(crate) planner: Planner,
}

impl TaskboardHandler {
    /// Create a handler from runtime settings
    ///
    /// Opens the store, applies the seed file (if any) to empty collections
    /// and re-plans reminders for every task. A seed file that cannot be read
    /// or applied is logged and skipped.
    ///
    /// # Example
    /// ```no_run
    /// # use taskboard_mcp::{PlannerConfig, TaskboardHandler};
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = TaskboardHandler::new(PlannerConfig::with_data_file("taskboard.toml"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: PlannerConfig) -> Result<Self> {
        let planner = Planner::open(config)?;

        if let Some(seed_file) = planner.config().seed_file.clone() {
            match InitialData::from_file(&seed_file)
                .and_then(|data| Ok(planner.bootstrap(data)?))
            {
                Ok(Some(report)) => {
                    tracing::debug!(seed = %seed_file.display(), ?report, "seed file processed");
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(
                    seed = %seed_file.display(),
                    error = %format!("{:#}", e),
                    "initial data not loaded"
                ),
            }
        }

        let scheduled = planner.refresh_reminders()?;
        tracing::info!(
            store = ?planner.storage().file_path(),
            reminders = scheduled,
            "taskboard ready"
        );
        Ok(Self { planner })
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }
}

/// Personal task board: categories group projects, projects group tasks.
///
/// Key concepts:
/// - **category**: top-level area such as "Work" or "School" (ids look like `cat_...`)
/// - **project**: a goal inside a category (`proj_...`)
/// - **task**: dated unit of work inside a project (`task_...`), with priority low/medium/high
/// - **overdue**: not completed and due before today
/// - **upcoming**: not completed and due within the next few days
///
/// Deleting a category deletes its projects and their tasks; deleting a project deletes its tasks.
#[mcp_server]
impl McpServer for TaskboardHandler {
    /// **Organize**: Create a category (top-level area such as "Work", "Personal").
    /// **Tip**: Color and icon are picked automatically when omitted.
    #[tool]
    async fn add_category(
        &self,
        /// Category name
        name: String,
        /// Display color, e.g. "#2196F3" (optional)
        color: Option<String>,
        /// Icon name, e.g. "briefcase-outline" (optional)
        icon: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_category(name, color, icon).await
    }

    /// **Review**: List all categories with their project counts.
    #[tool]
    async fn list_categories(&self) -> McpResult<String> {
        self.handle_list_categories().await
    }

    /// **Organize**: Rename a category or change its color/icon.
    #[tool]
    async fn update_category(
        &self,
        /// Category ID
        id: String,
        /// New name (optional)
        name: Option<String>,
        /// New color (optional)
        color: Option<String>,
        /// New icon (optional)
        icon: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_category(id, name, color, icon).await
    }

    /// **Delete**: Permanently delete a category, ALL of its projects and their tasks.
    #[tool]
    async fn delete_category(
        &self,
        /// Category ID
        id: String,
    ) -> McpResult<String> {
        self.handle_delete_category(id).await
    }

    /// **Organize**: Create a project inside a category.
    #[tool]
    async fn add_project(
        &self,
        /// Project name
        name: String,
        /// Parent category ID
        category_id: String,
        /// Description (optional)
        description: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_project(name, category_id, description).await
    }

    /// **Review**: List projects with task progress. Filter by category_id to see one area.
    #[tool]
    async fn list_projects(
        &self,
        /// Category ID filter (optional)
        category_id: Option<String>,
    ) -> McpResult<String> {
        self.handle_list_projects(category_id).await
    }

    /// **Organize**: Rename a project, change its description or move it to another category.
    #[tool]
    async fn update_project(
        &self,
        /// Project ID
        id: String,
        /// New name (optional)
        name: Option<String>,
        /// New description (optional)
        description: Option<String>,
        /// New category ID (optional)
        category_id: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_project(id, name, description, category_id)
            .await
    }

    /// **Delete**: Permanently delete a project and ALL of its tasks.
    #[tool]
    async fn delete_project(
        &self,
        /// Project ID
        id: String,
    ) -> McpResult<String> {
        self.handle_delete_project(id).await
    }

    /// **Capture**: Add a task to a project. It goes to the end of the project's list.
    /// **Reminders**: Scheduled 24h, 6h and 1h before the due date.
    #[tool]
    async fn add_task(
        &self,
        /// Task title
        title: String,
        /// Parent project ID
        project_id: String,
        /// Due date: YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339
        due_date: String,
        /// Description (optional)
        description: Option<String>,
        /// Priority: low/medium/high (optional, default medium)
        priority: Option<String>,
        /// Image URL or path attached to the task (optional)
        image_url: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_task(title, project_id, due_date, description, priority, image_url)
            .await
    }

    /// **Review**: Show every field of one task.
    #[tool]
    async fn get_task(
        &self,
        /// Task ID
        id: String,
    ) -> McpResult<String> {
        self.handle_get_task(id).await
    }

    /// **Review**: List tasks. project_id=that project in manual order; date=tasks due that day; neither=all tasks.
    #[tool]
    async fn list_tasks(
        &self,
        /// Project ID filter (optional)
        project_id: Option<String>,
        /// Due date filter YYYY-MM-DD (optional)
        date: Option<String>,
    ) -> McpResult<String> {
        self.handle_list_tasks(project_id, date).await
    }

    /// **Clarify**: Update task fields. Only given fields change.
    /// **Tip**: image_url="" removes the image.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn update_task(
        &self,
        /// Task ID
        id: String,
        /// New title (optional)
        title: Option<String>,
        /// New description (optional)
        description: Option<String>,
        /// New due date (optional)
        due_date: Option<String>,
        /// New priority: low/medium/high (optional)
        priority: Option<String>,
        /// Completed flag (optional)
        completed: Option<bool>,
        /// Image URL, ""=clear (optional)
        image_url: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_task(
            id,
            title,
            description,
            due_date,
            priority,
            completed,
            image_url,
        )
        .await
    }

    /// **Do**: Flip a task between completed and not completed.
    #[tool]
    async fn toggle_task(
        &self,
        /// Task ID
        id: String,
    ) -> McpResult<String> {
        self.handle_toggle_task(id).await
    }

    /// **Organize**: Move a task to another project (appended at the end).
    #[tool]
    async fn move_task(
        &self,
        /// Task ID
        id: String,
        /// Target project ID
        project_id: String,
    ) -> McpResult<String> {
        self.handle_move_task(id, project_id).await
    }

    /// **Organize**: Set the manual order of a project's tasks. Each task's position becomes its index in task_ids.
    #[tool]
    async fn reorder_tasks(
        &self,
        /// Project ID
        project_id: String,
        /// Task IDs in the desired order
        task_ids: Vec<String>,
    ) -> McpResult<String> {
        self.handle_reorder_tasks(project_id, task_ids).await
    }

    /// **Delete**: Permanently delete a task and cancel its reminders.
    #[tool]
    async fn delete_task(
        &self,
        /// Task ID
        id: String,
    ) -> McpResult<String> {
        self.handle_delete_task(id).await
    }

    /// **Review**: Overall progress, overdue tasks and the next tasks coming up.
    #[tool]
    async fn dashboard(&self) -> McpResult<String> {
        self.handle_dashboard().await
    }

    /// **Review**: Calendar markers per day (overdue/pending/completed). month=YYYY-MM limits to one month; date=YYYY-MM-DD lists that day's tasks.
    #[tool]
    async fn calendar(
        &self,
        /// Month filter YYYY-MM (optional)
        month: Option<String>,
        /// Day YYYY-MM-DD to list tasks for (optional)
        date: Option<String>,
    ) -> McpResult<String> {
        self.handle_calendar(month, date).await
    }

    /// **Review**: Incomplete tasks due before today.
    #[tool]
    async fn overdue(&self) -> McpResult<String> {
        self.handle_overdue().await
    }

    /// **Review**: Pending reminders and whether notifications are on.
    #[tool]
    async fn reminders(&self) -> McpResult<String> {
        self.handle_reminders().await
    }

    /// **Settings**: Turn task reminders on or off.
    #[tool]
    async fn set_notifications(
        &self,
        /// true=enable and reschedule, false=cancel all
        enabled: bool,
    ) -> McpResult<String> {
        self.handle_set_notifications(enabled).await
    }
}
