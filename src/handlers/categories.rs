//! Category handlers for the taskboard MCP server

use crate::TaskboardHandler;
use crate::formatting;
use crate::model::{CategoryPatch, NewCategory};
use crate::validation::{self, public_error};
use mcp_attr::{Result as McpResult, bail_public};

/// Colors handed out to new categories that don't name one
pub const DEFAULT_COLORS: [&str; 6] = [
    "#4CAF50", "#2196F3", "#9C27B0", "#FF9800", "#E91E63", "#00BCD4",
];

/// Icons handed out to new categories that don't name one
pub const DEFAULT_ICONS: [&str; 6] = [
    "folder-outline",
    "briefcase-outline",
    "school-outline",
    "home-outline",
    "star-outline",
    "heart-outline",
];

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TaskboardHandler {
    /// Creates a category; color and icon rotate through the defaults when omitted.
    pub async fn handle_add_category(
        &self,
        name: String,
        color: Option<String>,
        icon: Option<String>,
    ) -> McpResult<String> {
        let existing = self.planner.categories().map_err(public_error)?.len();

        let new = NewCategory {
            name: name.trim().to_string(),
            color: non_blank(color)
                .unwrap_or_else(|| DEFAULT_COLORS[existing % DEFAULT_COLORS.len()].to_string()),
            icon: non_blank(icon)
                .unwrap_or_else(|| DEFAULT_ICONS[existing % DEFAULT_ICONS.len()].to_string()),
        };

        let category = self.planner.create_category(new).map_err(public_error)?;
        Ok(format!(
            "Category created with ID: {} (name: {}, color: {}, icon: {})",
            category.id, category.name, category.color, category.icon
        ))
    }

    pub async fn handle_list_categories(&self) -> McpResult<String> {
        let categories = self.planner.categories().map_err(public_error)?;
        let counts = self
            .planner
            .category_project_counts()
            .map_err(public_error)?;
        Ok(formatting::format_categories(&categories, &counts))
    }

    pub async fn handle_update_category(
        &self,
        id: String,
        name: Option<String>,
        color: Option<String>,
        icon: Option<String>,
    ) -> McpResult<String> {
        let id = validation::normalize_id(&id);
        if name.is_none() && color.is_none() && icon.is_none() {
            bail_public!(_, "Nothing to update. Provide at least one of name, color, icon.");
        }

        let patch = CategoryPatch {
            name: name.map(|n| n.trim().to_string()),
            color: non_blank(color),
            icon: non_blank(icon),
        };
        let category = self
            .planner
            .update_category(&id, patch)
            .map_err(public_error)?;
        Ok(format!(
            "Category {} updated (name: {}, color: {}, icon: {})",
            category.id, category.name, category.color, category.icon
        ))
    }

    /// Deletes the category together with its projects and their tasks.
    pub async fn handle_delete_category(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_id(&id);
        let report = self.planner.delete_category(&id).map_err(public_error)?;
        Ok(format!(
            "Category {} deleted along with {} project(s) and {} task(s)",
            id, report.projects, report.tasks
        ))
    }
}
