//! Calendar view computations: per-day markers and the task list for a
//! selected day.

use crate::model::Task;
use crate::schedule::is_overdue;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// How a calendar day should be highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    /// At least one incomplete task is past due
    Overdue,
    /// Incomplete tasks remain, none overdue
    Pending,
    /// Everything due that day is done
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayMarker {
    pub date: NaiveDate,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
}

impl DayMarker {
    pub fn state(&self) -> MarkerState {
        if self.overdue > 0 {
            MarkerState::Overdue
        } else if self.pending > 0 {
            MarkerState::Pending
        } else {
            MarkerState::Completed
        }
    }

    pub fn total(&self) -> usize {
        self.completed + self.pending + self.overdue
    }
}

/// One marker per distinct due date, ascending
pub fn day_markers(tasks: &[Task], today: NaiveDate) -> Vec<DayMarker> {
    let mut days: BTreeMap<NaiveDate, DayMarker> = BTreeMap::new();

    for task in tasks {
        let date = task.due_day();
        let marker = days.entry(date).or_insert_with(|| DayMarker {
            date,
            completed: 0,
            pending: 0,
            overdue: 0,
        });
        if task.completed {
            marker.completed += 1;
        } else if is_overdue(task, today) {
            marker.overdue += 1;
        } else {
            marker.pending += 1;
        }
    }

    days.into_values().collect()
}

/// Markers for a single month
pub fn month_markers(tasks: &[Task], year: i32, month: u32, today: NaiveDate) -> Vec<DayMarker> {
    day_markers(tasks, today)
        .into_iter()
        .filter(|m| m.date.year() == year && m.date.month() == month)
        .collect()
}

/// Tasks due on `date`: incomplete before complete, overdue before the
/// rest; otherwise the stored order is kept.
pub fn tasks_for_date(tasks: &[Task], date: NaiveDate, today: NaiveDate) -> Vec<Task> {
    let mut due: Vec<Task> = tasks
        .iter()
        .filter(|t| t.due_day() == date)
        .cloned()
        .collect();
    due.sort_by_key(|t| (t.completed, !is_overdue(t, today)));
    due
}
