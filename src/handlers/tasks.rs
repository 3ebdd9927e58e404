//! Task handlers for the taskboard MCP server

use crate::TaskboardHandler;
use crate::error::TaskboardError;
use crate::formatting;
use crate::model::{NewTask, Priority, TaskPatch, local_date_today};
use crate::validation::{self, public_error};
use mcp_attr::{Result as McpResult, bail_public};

impl TaskboardHandler {
    /// Turns an unknown-project error into one that lists the valid choices.
    pub(crate) fn project_error(&self, project_id: &str, err: TaskboardError) -> mcp_attr::Error {
        match err {
            TaskboardError::NotFound { entity: "Project", .. } => {
                let projects = self.planner.projects(None).unwrap_or_default();
                mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(
                    validation::format_invalid_project_error(project_id, &projects),
                    true,
                )
            }
            other => public_error(other),
        }
    }

    pub async fn handle_add_task(
        &self,
        title: String,
        project_id: String,
        due_date: String,
        description: Option<String>,
        priority: Option<String>,
        image_url: Option<String>,
    ) -> McpResult<String> {
        let project_id = validation::normalize_id(&project_id);
        let due_date = validation::parse_due_date(&due_date)?;
        let priority = match priority {
            Some(p) => validation::parse_priority(&p)?,
            None => Priority::default(),
        };

        let new = NewTask {
            title: title.trim().to_string(),
            description: description.map(|d| d.trim().to_string()).unwrap_or_default(),
            due_date,
            project_id: project_id.clone(),
            completed: false,
            image_url: validation::optional_field(image_url).flatten(),
            priority,
        };

        let task = self
            .planner
            .create_task(new)
            .map_err(|e| self.project_error(&project_id, e))?;
        Ok(format!(
            "Task created with ID: {} (project: {}, order: {}, due: {})",
            task.id,
            task.project_id,
            task.order,
            formatting::format_due(task.due_date, local_date_today())
        ))
    }

    pub async fn handle_get_task(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_id(&id);
        let task = self.planner.task(&id).map_err(public_error)?;
        Ok(formatting::format_task_detail(&task, local_date_today()))
    }

    /// Lists tasks of one project (in order), of one day (calendar order) or all of them.
    pub async fn handle_list_tasks(
        &self,
        project_id: Option<String>,
        date: Option<String>,
    ) -> McpResult<String> {
        let today = local_date_today();
        let project_id = project_id
            .map(|p| validation::normalize_id(&p))
            .filter(|p| !p.is_empty());
        let date = match date {
            Some(d) if !d.trim().is_empty() => Some(validation::parse_date(&d)?),
            _ => None,
        };

        let mut tasks = match (&project_id, date) {
            (Some(project_id), _) => self
                .planner
                .project_tasks(project_id)
                .map_err(|e| self.project_error(project_id, e))?,
            (None, Some(date)) => self.planner.tasks_on(date, today).map_err(public_error)?,
            (None, None) => self.planner.tasks().map_err(public_error)?,
        };

        if project_id.is_some()
            && let Some(date) = date
        {
            tasks.retain(|t| t.due_day() == date);
        }

        Ok(formatting::format_tasks(&tasks, today))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn handle_update_task(
        &self,
        id: String,
        title: Option<String>,
        description: Option<String>,
        due_date: Option<String>,
        priority: Option<String>,
        completed: Option<bool>,
        image_url: Option<String>,
    ) -> McpResult<String> {
        let id = validation::normalize_id(&id);
        if title.is_none()
            && description.is_none()
            && due_date.is_none()
            && priority.is_none()
            && completed.is_none()
            && image_url.is_none()
        {
            bail_public!(
                _,
                "Nothing to update. Provide at least one of title, description, due_date, priority, completed, image_url."
            );
        }

        let patch = TaskPatch {
            title: title.map(|t| t.trim().to_string()),
            description: description.map(|d| d.trim().to_string()),
            due_date: due_date
                .map(|d| validation::parse_due_date(&d))
                .transpose()?,
            completed,
            image_url: validation::optional_field(image_url),
            priority: priority
                .map(|p| validation::parse_priority(&p))
                .transpose()?,
        };

        let task = self.planner.update_task(&id, patch).map_err(public_error)?;
        Ok(format!(
            "Task {} updated:\n{}",
            task.id,
            formatting::format_task_detail(&task, local_date_today())
        ))
    }

    pub async fn handle_toggle_task(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_id(&id);
        let task = self.planner.toggle_task(&id).map_err(public_error)?;
        Ok(format!(
            "Task {} marked as {}",
            task.id,
            if task.completed { "completed" } else { "not completed" }
        ))
    }

    /// Moves a task to the end of another project.
    pub async fn handle_move_task(&self, id: String, project_id: String) -> McpResult<String> {
        let id = validation::normalize_id(&id);
        let project_id = validation::normalize_id(&project_id);
        let task = self
            .planner
            .move_task(&id, &project_id)
            .map_err(|e| self.project_error(&project_id, e))?;
        Ok(format!(
            "Task {} moved to project {} (order: {})",
            task.id, task.project_id, task.order
        ))
    }

    pub async fn handle_reorder_tasks(
        &self,
        project_id: String,
        task_ids: Vec<String>,
    ) -> McpResult<String> {
        if task_ids.is_empty() {
            bail_public!(_, "No task IDs provided. Please specify the new order of task IDs.");
        }
        let project_id = validation::normalize_id(&project_id);
        let task_ids: Vec<String> = task_ids
            .iter()
            .map(|id| validation::normalize_id(id))
            .collect();

        let updated = self
            .planner
            .reorder_tasks(&project_id, &task_ids)
            .map_err(|e| self.project_error(&project_id, e))?;

        let mut response = format!("Reordered {} task(s) in project {}", updated, project_id);
        let skipped = task_ids.len().saturating_sub(updated);
        if skipped > 0 {
            response.push_str(&format!(
                " ({} id(s) skipped: not found in this project)",
                skipped
            ));
        }
        Ok(response)
    }

    pub async fn handle_delete_task(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_id(&id);
        self.planner.delete_task(&id).map_err(public_error)?;
        Ok(format!("Task {} deleted", id))
    }
}
