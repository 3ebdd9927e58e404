//! Formatting helpers for taskboard tool output
//!
//! Everything the MCP tools return is plain text built here.

use crate::calendar::{DayMarker, MarkerState};
use crate::dashboard::{DashboardSummary, Progress};
use crate::model::{Category, Project, Task};
use crate::notifications::{Reminder, ReminderKind};
use crate::schedule::{RelativeDay, is_overdue, relative_day};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use std::collections::HashMap;

/// Human label for a due date: "Today", "Tomorrow", "Yesterday" or the
/// weekday and date, plus the time when it is not midnight.
pub fn format_due(due: NaiveDateTime, today: NaiveDate) -> String {
    let day = match relative_day(due.date(), today) {
        RelativeDay::Today => "Today".to_string(),
        RelativeDay::Tomorrow => "Tomorrow".to_string(),
        RelativeDay::Yesterday => "Yesterday".to_string(),
        RelativeDay::Other(date) => date.format("%A, %-d %B %Y").to_string(),
    };
    if due.hour() == 0 && due.minute() == 0 {
        day
    } else {
        format!("{} {}", day, due.format("%H:%M"))
    }
}

pub fn format_categories(categories: &[Category], project_counts: &HashMap<String, usize>) -> String {
    if categories.is_empty() {
        return "No categories found".to_string();
    }

    let mut result = format!("Found {} category(ies):\n\n", categories.len());
    for category in categories {
        let projects = project_counts.get(&category.id).copied().unwrap_or(0);
        result.push_str(&format!(
            "- [{}] {} (color: {}, icon: {}, projects: {})\n",
            category.id, category.name, category.color, category.icon, projects
        ));
    }
    result
}

pub fn format_projects(projects: &[Project], progress: &HashMap<String, Progress>) -> String {
    if projects.is_empty() {
        return "No projects found".to_string();
    }

    let mut result = format!("Found {} project(s):\n\n", projects.len());
    for project in projects {
        let p = progress.get(&project.id).copied().unwrap_or_default();
        result.push_str(&format!(
            "- [{}] {} (category: {}, tasks: {}/{} done, {}%)\n",
            project.id,
            project.name,
            project.category_id,
            p.completed,
            p.total,
            p.percent()
        ));
        if !project.description.is_empty() {
            result.push_str(&format!("  Description: {}\n", project.description));
        }
    }
    result
}

fn task_line(task: &Task, today: NaiveDate) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!(
        "- [{}] {} {} (priority: {}, due: {}",
        mark,
        task.id,
        task.title,
        task.priority,
        format_due(task.due_date, today)
    );
    if is_overdue(task, today) {
        line.push_str(", OVERDUE");
    }
    line.push_str(")\n");
    line
}

/// One line per task, in the order given
pub fn format_tasks(tasks: &[Task], today: NaiveDate) -> String {
    if tasks.is_empty() {
        return "No tasks found".to_string();
    }

    let mut result = format!("Found {} task(s):\n\n", tasks.len());
    for task in tasks {
        result.push_str(&task_line(task, today));
    }
    result
}

/// Every field of one task
pub fn format_task_detail(task: &Task, today: NaiveDate) -> String {
    let mut result = format!("[{}] {}\n", task.id, task.title);
    result.push_str(&format!(
        "  Status: {}\n",
        if task.completed {
            "completed"
        } else if is_overdue(task, today) {
            "overdue"
        } else {
            "pending"
        }
    ));
    result.push_str(&format!("  Project: {}\n", task.project_id));
    result.push_str(&format!("  Priority: {}\n", task.priority));
    result.push_str(&format!(
        "  Due: {} ({})\n",
        format_due(task.due_date, today),
        task.due_date.format("%Y-%m-%d %H:%M")
    ));
    result.push_str(&format!("  Order: {}\n", task.order));
    if !task.description.is_empty() {
        result.push_str(&format!("  Description: {}\n", task.description));
    }
    if let Some(ref url) = task.image_url {
        result.push_str(&format!("  Image: {}\n", url));
    }
    result.push_str(&format!("  Created: {}\n", task.created_at.format("%Y-%m-%d %H:%M")));
    result.push_str(&format!("  Updated: {}\n", task.updated_at.format("%Y-%m-%d %H:%M")));
    result
}

pub fn format_dashboard(summary: &DashboardSummary, today: NaiveDate) -> String {
    let mut result = format!(
        "Progress: {}/{} tasks completed ({}%)\n",
        summary.completed, summary.total, summary.progress_percent
    );

    result.push_str(&format!("\nOverdue ({}):\n", summary.overdue.len()));
    if summary.overdue.is_empty() {
        result.push_str("  nothing overdue\n");
    }
    for task in &summary.overdue {
        result.push_str(&format!("  {}", task_line(task, today)));
    }

    result.push_str(&format!("\nUpcoming ({}):\n", summary.upcoming.len()));
    if summary.upcoming.is_empty() {
        result.push_str("  nothing due soon\n");
    }
    for task in &summary.upcoming {
        result.push_str(&format!("  {}", task_line(task, today)));
    }
    result
}

pub fn format_calendar(markers: &[DayMarker]) -> String {
    if markers.is_empty() {
        return "No tasks scheduled".to_string();
    }

    let mut result = format!("{} day(s) with tasks:\n\n", markers.len());
    for marker in markers {
        let state = match marker.state() {
            MarkerState::Overdue => "overdue",
            MarkerState::Pending => "pending",
            MarkerState::Completed => "completed",
        };
        result.push_str(&format!(
            "- {} [{}] {} task(s): {} completed, {} pending, {} overdue\n",
            marker.date.format("%Y-%m-%d"),
            state,
            marker.total(),
            marker.completed,
            marker.pending,
            marker.overdue
        ));
    }
    result
}

pub fn format_reminders(reminders: &[Reminder], enabled: bool) -> String {
    let mut result = format!(
        "Notifications: {}\n",
        if enabled { "enabled" } else { "disabled" }
    );
    if reminders.is_empty() {
        result.push_str("No pending reminders");
        return result;
    }

    result.push_str(&format!("{} pending reminder(s):\n\n", reminders.len()));
    for reminder in reminders {
        let kind = match reminder.kind {
            ReminderKind::Reminder => format!("{}h before", reminder.hours_before),
            ReminderKind::Overdue => "overdue".to_string(),
        };
        result.push_str(&format!(
            "- #{} {} at {} ({}): {}\n",
            reminder.id,
            reminder.title,
            reminder.fire_at.format("%Y-%m-%d %H:%M"),
            kind,
            reminder.body
        ));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewTask, Priority};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    fn task(title: &str, due: NaiveDateTime, completed: bool) -> Task {
        Task::create(
            NewTask {
                title: title.to_string(),
                description: String::new(),
                due_date: due,
                project_id: "proj_1".to_string(),
                completed,
                image_url: None,
                priority: Priority::High,
            },
            0,
        )
    }

    #[test]
    fn test_format_due_relative_labels() {
        let at = |d: u32, h: u32| {
            NaiveDate::from_ymd_opt(2025, 3, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        assert_eq!(format_due(at(15, 9), today()), "Today 09:00");
        assert_eq!(format_due(at(16, 0), today()), "Tomorrow");
        assert_eq!(format_due(at(14, 18), today()), "Yesterday 18:00");
        assert_eq!(format_due(at(20, 0), today()), "Thursday, 20 March 2025");
    }

    #[test]
    fn test_format_tasks_marks_overdue() {
        let due = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let output = format_tasks(&[task("Pay rent", due, false)], today());
        assert!(output.contains("Found 1 task(s)"));
        assert!(output.contains("Pay rent"));
        assert!(output.contains("priority: high"));
        assert!(output.contains("OVERDUE"));

        assert_eq!(format_tasks(&[], today()), "No tasks found");
    }

    #[test]
    fn test_format_dashboard_empty_sections() {
        let summary = DashboardSummary {
            total: 0,
            completed: 0,
            progress_percent: 0,
            overdue: vec![],
            upcoming: vec![],
        };
        let output = format_dashboard(&summary, today());
        assert!(output.starts_with("Progress: 0/0 tasks completed (0%)"));
        assert!(output.contains("nothing overdue"));
        assert!(output.contains("nothing due soon"));
    }

    #[test]
    fn test_format_calendar() {
        let marker = DayMarker {
            date: today(),
            completed: 1,
            pending: 2,
            overdue: 0,
        };
        let output = format_calendar(&[marker]);
        assert!(output.contains("2025-03-15 [pending] 3 task(s)"));
    }
}
