use super::dates::{deserialize_lenient, local_now};
use super::{TASK_ID_PREFIX, generate_id};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!(
                "Invalid priority '{}'. Valid options are: low, medium, high",
                s
            )),
        }
    }
}

/// A unit of work inside a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Deadline in local wall-clock time
    #[serde(deserialize_with = "deserialize_lenient")]
    pub due_date: NaiveDateTime,
    pub project_id: String,
    #[serde(default)]
    pub completed: bool,
    /// Path or URL of an attached photo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    /// Position within the project (ascending)
    #[serde(default)]
    pub order: i64,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub created_at: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDateTime,
    pub project_id: String,
    pub completed: bool,
    pub image_url: Option<String>,
    pub priority: Priority,
}

/// Partial update. `image_url: Some(None)` clears the image.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDateTime>,
    pub completed: Option<bool>,
    pub image_url: Option<Option<String>>,
    pub priority: Option<Priority>,
}

impl Task {
    pub fn create(new: NewTask, order: i64) -> Self {
        let now = local_now();
        Self {
            id: generate_id(TASK_ID_PREFIX),
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            project_id: new.project_id,
            completed: new.completed,
            image_url: new.image_url,
            priority: new.priority,
            order,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a patch and refresh `updated_at`
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = local_now();
    }

    /// Due date truncated to the calendar day
    pub fn due_day(&self) -> NaiveDate {
        self.due_date.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_str() {
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!(" High ".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_task_deserializes_from_camel_case_json() {
        let json = r#"{
            "id": "task_1",
            "title": "Write report",
            "dueDate": "2025-03-15",
            "projectId": "proj_1",
            "priority": "high",
            "createdAt": "2025-03-01T08:00:00",
            "updatedAt": "2025-03-01T08:00:00"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.due_day(), NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.order, 0);
        assert!(!task.completed);
        assert!(task.description.is_empty());
        assert!(task.image_url.is_none());
    }

    #[test]
    fn test_apply_patch_clears_image() {
        let due = NaiveDate::from_ymd_opt(2025, 3, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut task = Task::create(
            NewTask {
                title: "Photo".to_string(),
                description: String::new(),
                due_date: due,
                project_id: "proj_1".to_string(),
                completed: false,
                image_url: Some("file:///tmp/a.jpg".to_string()),
                priority: Priority::Low,
            },
            0,
        );

        task.apply(TaskPatch {
            image_url: Some(None),
            completed: Some(true),
            ..Default::default()
        });

        assert!(task.image_url.is_none());
        assert!(task.completed);
        assert_eq!(task.title, "Photo");
    }
}
