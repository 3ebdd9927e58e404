//! Dashboard summary: completion progress, overdue tasks and what is coming
//! up next.

use crate::model::{Project, Task};
use crate::schedule::{self, UpcomingWindow};
use chrono::NaiveDate;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total: usize,
    pub completed: usize,
    /// Rounded percentage of completed tasks, 0 when there are none
    pub progress_percent: u8,
    pub overdue: Vec<Task>,
    pub upcoming: Vec<Task>,
}

/// Completed/total for a group of tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
}

impl Progress {
    pub fn percent(&self) -> u8 {
        progress_percent(self.completed, self.total)
    }
}

pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = completed as f64 / total as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn summarize(tasks: &[Task], today: NaiveDate, window: UpcomingWindow) -> DashboardSummary {
    let completed = tasks.iter().filter(|t| t.completed).count();
    DashboardSummary {
        total: tasks.len(),
        completed,
        progress_percent: progress_percent(completed, tasks.len()),
        overdue: schedule::overdue(tasks, today),
        upcoming: schedule::upcoming(tasks, today, window),
    }
}

/// Task progress keyed by project id
pub fn project_progress(tasks: &[Task]) -> HashMap<String, Progress> {
    let mut progress: HashMap<String, Progress> = HashMap::new();
    for task in tasks {
        let entry = progress.entry(task.project_id.clone()).or_default();
        entry.total += 1;
        if task.completed {
            entry.completed += 1;
        }
    }
    progress
}

/// Number of projects keyed by category id
pub fn category_project_counts(projects: &[Project]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for project in projects {
        *counts.entry(project.category_id.clone()).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewProject, NewTask, Priority};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    fn task(project: &str, offset_days: i64, completed: bool) -> Task {
        Task::create(
            NewTask {
                title: format!("{}{}", project, offset_days),
                description: String::new(),
                due_date: (today() + chrono::Duration::days(offset_days))
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
                project_id: project.to_string(),
                completed,
                image_url: None,
                priority: Priority::Medium,
            },
            0,
        )
    }

    #[test]
    fn test_progress_percent_rounds() {
        assert_eq!(progress_percent(0, 0), 0);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(1, 8), 13);
        assert_eq!(progress_percent(4, 4), 100);
    }

    #[test]
    fn test_summarize() {
        let tasks = vec![
            task("p1", -2, false),
            task("p1", -1, true),
            task("p2", 0, false),
            task("p2", 3, false),
            task("p2", 10, false),
        ];

        let summary = summarize(&tasks, today(), UpcomingWindow::default());
        assert_eq!(summary.total, 5);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.progress_percent, 20);
        assert_eq!(summary.overdue.len(), 1);
        assert_eq!(summary.upcoming.len(), 2);
    }

    #[test]
    fn test_project_progress() {
        let tasks = vec![task("p1", 0, true), task("p1", 1, false), task("p2", 0, false)];
        let progress = project_progress(&tasks);

        assert_eq!(progress["p1"], Progress { total: 2, completed: 1 });
        assert_eq!(progress["p1"].percent(), 50);
        assert_eq!(progress["p2"].completed, 0);
        assert!(!progress.contains_key("p3"));
    }

    #[test]
    fn test_category_project_counts() {
        let projects: Vec<Project> = ["c1", "c1", "c2"]
            .iter()
            .map(|c| {
                Project::create(NewProject {
                    name: "x".to_string(),
                    description: String::new(),
                    category_id: c.to_string(),
                })
            })
            .collect();

        let counts = category_project_counts(&projects);
        assert_eq!(counts["c1"], 2);
        assert_eq!(counts["c2"], 1);
    }
}
