//! Project handlers for the taskboard MCP server

use crate::TaskboardHandler;
use crate::error::TaskboardError;
use crate::formatting;
use crate::model::{NewProject, ProjectPatch};
use crate::validation::{self, public_error};
use mcp_attr::{Result as McpResult, bail_public};

impl TaskboardHandler {
    /// Turns an unknown-category error into one that lists the valid choices.
    pub(crate) fn category_error(&self, category_id: &str, err: TaskboardError) -> mcp_attr::Error {
        match err {
            TaskboardError::NotFound { entity: "Category", .. } => {
                let categories = self.planner.categories().unwrap_or_default();
                mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(
                    validation::format_invalid_category_error(category_id, &categories),
                    true,
                )
            }
            other => public_error(other),
        }
    }

    pub async fn handle_add_project(
        &self,
        name: String,
        category_id: String,
        description: Option<String>,
    ) -> McpResult<String> {
        let category_id = validation::normalize_id(&category_id);
        let new = NewProject {
            name: name.trim().to_string(),
            description: description.map(|d| d.trim().to_string()).unwrap_or_default(),
            category_id: category_id.clone(),
        };

        let project = self
            .planner
            .create_project(new)
            .map_err(|e| self.category_error(&category_id, e))?;
        Ok(format!(
            "Project created with ID: {} (name: {}, category: {})",
            project.id, project.name, project.category_id
        ))
    }

    /// Lists projects with their task progress, optionally for one category.
    pub async fn handle_list_projects(&self, category_id: Option<String>) -> McpResult<String> {
        let category_id = category_id
            .map(|c| validation::normalize_id(&c))
            .filter(|c| !c.is_empty());

        if let Some(ref id) = category_id {
            self.planner
                .category(id)
                .map_err(|e| self.category_error(id, e))?;
        }

        let projects = self
            .planner
            .projects(category_id.as_deref())
            .map_err(public_error)?;
        let progress = self.planner.project_progress().map_err(public_error)?;
        Ok(formatting::format_projects(&projects, &progress))
    }

    pub async fn handle_update_project(
        &self,
        id: String,
        name: Option<String>,
        description: Option<String>,
        category_id: Option<String>,
    ) -> McpResult<String> {
        let id = validation::normalize_id(&id);
        if name.is_none() && description.is_none() && category_id.is_none() {
            bail_public!(
                _,
                "Nothing to update. Provide at least one of name, description, category_id."
            );
        }

        let category_id = category_id.map(|c| validation::normalize_id(&c));
        let patch = ProjectPatch {
            name: name.map(|n| n.trim().to_string()),
            description: description.map(|d| d.trim().to_string()),
            category_id: category_id.clone(),
        };

        let project = self.planner.update_project(&id, patch).map_err(|e| {
            self.category_error(category_id.as_deref().unwrap_or_default(), e)
        })?;
        Ok(format!(
            "Project {} updated (name: {}, category: {})",
            project.id, project.name, project.category_id
        ))
    }

    /// Deletes the project and every task in it.
    pub async fn handle_delete_project(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_id(&id);
        let report = self.planner.delete_project(&id).map_err(public_error)?;
        Ok(format!(
            "Project {} deleted along with {} task(s)",
            id, report.tasks
        ))
    }
}
