//! Runtime settings shared by the planner and the tool surface.

use crate::schedule::{DEFAULT_UPCOMING_DAYS, DEFAULT_UPCOMING_LIMIT, UpcomingWindow};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Store file; `None` keeps everything in memory
    pub data_file: Option<PathBuf>,
    /// Initial-data JSON applied to empty collections on startup
    pub seed_file: Option<PathBuf>,
    /// Schedule reminders for new and changed tasks
    pub notifications: bool,
    pub upcoming: UpcomingWindow,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            seed_file: None,
            notifications: true,
            upcoming: UpcomingWindow {
                days: DEFAULT_UPCOMING_DAYS,
                limit: DEFAULT_UPCOMING_LIMIT,
            },
        }
    }
}

impl PlannerConfig {
    pub fn with_data_file(path: impl Into<PathBuf>) -> Self {
        Self {
            data_file: Some(path.into()),
            ..Self::default()
        }
    }
}
