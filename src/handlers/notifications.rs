//! Reminder handlers

use crate::TaskboardHandler;
use crate::formatting;
use crate::validation::public_error;
use mcp_attr::Result as McpResult;

impl TaskboardHandler {
    pub async fn handle_reminders(&self) -> McpResult<String> {
        let enabled = self.planner.notifications_enabled().map_err(public_error)?;
        let reminders = self.planner.reminders().map_err(public_error)?;
        Ok(formatting::format_reminders(&reminders, enabled))
    }

    /// Enabling re-plans reminders for every task; disabling cancels them all.
    pub async fn handle_set_notifications(&self, enabled: bool) -> McpResult<String> {
        let pending = self
            .planner
            .set_notifications(enabled)
            .map_err(public_error)?;
        if enabled {
            Ok(format!(
                "Notifications enabled ({} reminder(s) scheduled)",
                pending
            ))
        } else {
            Ok("Notifications disabled; all pending reminders cancelled".to_string())
        }
    }
}
