//! Read-only views: dashboard, calendar and overdue list

use crate::TaskboardHandler;
use crate::formatting;
use crate::model::local_date_today;
use crate::validation::{self, public_error};
use mcp_attr::Result as McpResult;

impl TaskboardHandler {
    pub async fn handle_dashboard(&self) -> McpResult<String> {
        let today = local_date_today();
        let summary = self.planner.dashboard(today).map_err(public_error)?;
        Ok(formatting::format_dashboard(&summary, today))
    }

    /// Day markers for a month (YYYY-MM), or for every day with tasks.
    /// With `date` the tasks of that day are listed instead.
    pub async fn handle_calendar(
        &self,
        month: Option<String>,
        date: Option<String>,
    ) -> McpResult<String> {
        let today = local_date_today();

        if let Some(date) = date.filter(|d| !d.trim().is_empty()) {
            let date = validation::parse_date(&date)?;
            let tasks = self.planner.tasks_on(date, today).map_err(public_error)?;
            return Ok(format!(
                "{}:\n{}",
                date.format("%Y-%m-%d"),
                formatting::format_tasks(&tasks, today)
            ));
        }

        let month = match month.filter(|m| !m.trim().is_empty()) {
            Some(m) => Some(validation::parse_month(&m)?),
            None => None,
        };
        let markers = self.planner.calendar(month, today).map_err(public_error)?;
        Ok(formatting::format_calendar(&markers))
    }

    pub async fn handle_overdue(&self) -> McpResult<String> {
        let today = local_date_today();
        let tasks = self.planner.overdue(today).map_err(public_error)?;
        if tasks.is_empty() {
            return Ok("No overdue tasks".to_string());
        }
        Ok(formatting::format_tasks(&tasks, today))
    }
}
