//! Validation helpers for the taskboard MCP server
//!
//! Parses tool arguments (ids, dates, priorities) and turns domain errors
//! into messages the MCP client gets to see.

use crate::error::TaskboardError;
use crate::model::dates::parse_date_time;
use crate::model::{Category, Priority, Project};
use chrono::{NaiveDate, NaiveDateTime};
use mcp_attr::Result as McpResult;

fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

/// Convert a planner error into a public MCP error
pub fn public_error(err: TaskboardError) -> mcp_attr::Error {
    match err {
        TaskboardError::Storage(e) => invalid_params(format!("Failed to save: {}", e)),
        other => invalid_params(other.to_string()),
    }
}

/// Ids are opaque strings; only surrounding whitespace is dropped.
pub fn normalize_id(id: &str) -> String {
    id.trim().to_string()
}

/// Parse a due date: `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` or RFC 3339
pub fn parse_due_date(input: &str) -> McpResult<NaiveDateTime> {
    parse_date_time(input.trim()).ok_or_else(|| {
        invalid_params(format!(
            "Invalid due date '{}'. Use YYYY-MM-DD, YYYY-MM-DDTHH:MM or RFC 3339 (e.g., '2025-03-15T09:00')",
            input
        ))
    })
}

/// Parse a calendar day in YYYY-MM-DD format
pub fn parse_date(input: &str) -> McpResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        invalid_params(format!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
            input
        ))
    })
}

/// Parse a month in YYYY-MM format
pub fn parse_month(input: &str) -> McpResult<(i32, u32)> {
    let invalid = || {
        invalid_params(format!(
            "Invalid month '{}'. Use YYYY-MM (e.g., '2025-03')",
            input
        ))
    };
    let (year, month) = input.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

pub fn parse_priority(input: &str) -> McpResult<Priority> {
    input.parse::<Priority>().map_err(|_| {
        invalid_params(format!(
            "Invalid priority '{}'. Valid priorities: low, medium, high",
            input
        ))
    })
}

/// Update semantics for optional text fields: absent keeps the value,
/// an empty string clears it.
pub fn optional_field(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| {
        let v = v.trim();
        if v.is_empty() { None } else { Some(v.to_string()) }
    })
}

/// Error message for an unknown category, listing the ones that exist
pub fn format_invalid_category_error(category_id: &str, categories: &[Category]) -> String {
    if categories.is_empty() {
        format!(
            "Category '{}' does not exist. No categories have been created yet. Create one first using add_category().",
            category_id
        )
    } else {
        let available: Vec<String> = categories
            .iter()
            .map(|c| format!("{} ({})", c.id, c.name))
            .collect();
        format!(
            "Category '{}' does not exist.\nAvailable categories: {}",
            category_id,
            available.join(", ")
        )
    }
}

/// Error message for an unknown project, listing the ones that exist
pub fn format_invalid_project_error(project_id: &str, projects: &[Project]) -> String {
    if projects.is_empty() {
        format!(
            "Project '{}' does not exist. No projects have been created yet. Create one first using add_project().",
            project_id
        )
    } else {
        let available: Vec<String> = projects
            .iter()
            .map(|p| format!("{} ({})", p.id, p.name))
            .collect();
        format!(
            "Project '{}' does not exist.\nAvailable projects: {}",
            project_id,
            available.join(", ")
        )
    }
}
