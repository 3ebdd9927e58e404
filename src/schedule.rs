//! Due-date classification
//!
//! Every check works on calendar days: a task's due date is truncated to the
//! day before comparing, and `today` is always passed in so that callers
//! (and tests) control the clock.

use crate::model::Task;
use chrono::{Days, NaiveDate};

pub const DEFAULT_UPCOMING_DAYS: u64 = 7;
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// Incomplete and due strictly before today
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.completed && task.due_day() < today
}

/// Due on `today`, regardless of completion
pub fn is_due_today(task: &Task, today: NaiveDate) -> bool {
    task.due_day() == today
}

/// All overdue tasks, in stored order
pub fn overdue(tasks: &[Task], today: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| is_overdue(t, today))
        .cloned()
        .collect()
}

/// Bounds of the dashboard's "coming up" list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingWindow {
    /// Days after today included in the window (inclusive)
    pub days: u64,
    /// Maximum number of tasks returned
    pub limit: usize,
}

impl Default for UpcomingWindow {
    fn default() -> Self {
        Self {
            days: DEFAULT_UPCOMING_DAYS,
            limit: DEFAULT_UPCOMING_LIMIT,
        }
    }
}

impl UpcomingWindow {
    pub fn contains(&self, task: &Task, today: NaiveDate) -> bool {
        let end = today.checked_add_days(Days::new(self.days)).unwrap_or(NaiveDate::MAX);
        let day = task.due_day();
        !task.completed && day >= today && day <= end
    }
}

/// Incomplete tasks due within `[today, today + window.days]`, soonest
/// first, capped at `window.limit`
pub fn upcoming(tasks: &[Task], today: NaiveDate, window: UpcomingWindow) -> Vec<Task> {
    let mut due: Vec<Task> = tasks
        .iter()
        .filter(|t| window.contains(t, today))
        .cloned()
        .collect();
    due.sort_by_key(|t| t.due_date);
    due.truncate(window.limit);
    due
}

/// A date expressed relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Yesterday,
    Today,
    Tomorrow,
    Other(NaiveDate),
}

pub fn relative_day(date: NaiveDate, today: NaiveDate) -> RelativeDay {
    match (date - today).num_days() {
        -1 => RelativeDay::Yesterday,
        0 => RelativeDay::Today,
        1 => RelativeDay::Tomorrow,
        _ => RelativeDay::Other(date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewTask, Priority};
    use chrono::NaiveDateTime;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    fn at(date: NaiveDate, hour: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, 0, 0).unwrap()
    }

    fn task_due(title: &str, due_date: NaiveDateTime, completed: bool) -> Task {
        Task::create(
            NewTask {
                title: title.to_string(),
                description: String::new(),
                due_date,
                project_id: "p1".to_string(),
                completed,
                image_url: None,
                priority: Priority::Medium,
            },
            0,
        )
    }

    #[test]
    fn test_due_yesterday_incomplete_is_overdue() {
        let yesterday = today().pred_opt().unwrap();
        let task = task_due("report", at(yesterday, 23), false);
        assert!(is_overdue(&task, today()));

        let done = task_due("report", at(yesterday, 23), true);
        assert!(!is_overdue(&done, today()));
    }

    #[test]
    fn test_due_earlier_today_is_not_overdue() {
        let task = task_due("standup", at(today(), 0), false);
        assert!(!is_overdue(&task, today()));
        assert!(is_due_today(&task, today()));
    }

    #[test]
    fn test_due_today_ignores_completion() {
        let task = task_due("done", at(today(), 18), true);
        assert!(is_due_today(&task, today()));
        assert!(!is_due_today(&task, today().succ_opt().unwrap()));
    }

    #[test]
    fn test_upcoming_window_bounds() {
        let window = UpcomingWindow::default();
        let day = |offset: i64| today() + chrono::Duration::days(offset);

        assert!(window.contains(&task_due("today", at(day(0), 9), false), today()));
        assert!(window.contains(&task_due("edge", at(day(7), 23), false), today()));
        assert!(!window.contains(&task_due("past", at(day(-1), 9), false), today()));
        assert!(!window.contains(&task_due("far", at(day(8), 0), false), today()));
        assert!(!window.contains(&task_due("done", at(day(1), 9), true), today()));
    }

    #[test]
    fn test_upcoming_sorted_and_capped() {
        let day = |offset: i64| today() + chrono::Duration::days(offset);
        let tasks: Vec<Task> = (0..7)
            .rev()
            .map(|i| task_due(&format!("t{}", i), at(day(i), 12), false))
            .collect();

        let result = upcoming(&tasks, today(), UpcomingWindow::default());
        let titles: Vec<&str> = result.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["t0", "t1", "t2", "t3", "t4"]);
    }

    #[test]
    fn test_upcoming_orders_by_time_within_day() {
        let late = task_due("late", at(today(), 20), false);
        let early = task_due("early", at(today(), 8), false);
        let result = upcoming(&[late, early], today(), UpcomingWindow::default());
        assert_eq!(result[0].title, "early");
    }

    #[test]
    fn test_relative_day() {
        let t = today();
        assert_eq!(relative_day(t, t), RelativeDay::Today);
        assert_eq!(relative_day(t.succ_opt().unwrap(), t), RelativeDay::Tomorrow);
        assert_eq!(relative_day(t.pred_opt().unwrap(), t), RelativeDay::Yesterday);
        let later = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert_eq!(relative_day(later, t), RelativeDay::Other(later));
    }
}
