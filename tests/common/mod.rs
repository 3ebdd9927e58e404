//! Common test utilities for integration tests
#![allow(dead_code)]

use chrono::{Duration, NaiveDateTime};
use taskboard_mcp::model::{NewCategory, NewProject, NewTask, local_now};
use taskboard_mcp::{Category, Planner, PlannerConfig, Priority, Project, Task, TaskboardHandler};
use tempfile::NamedTempFile;

/// Create a test handler with temporary storage
pub fn get_test_handler() -> (TaskboardHandler, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let handler = TaskboardHandler::new(PlannerConfig::with_data_file(temp_file.path())).unwrap();
    (handler, temp_file)
}

/// Create a planner backed by a temporary store file
pub fn get_test_planner() -> (Planner, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let planner = Planner::open(PlannerConfig::with_data_file(temp_file.path())).unwrap();
    (planner, temp_file)
}

/// Extract the id from a "... created with ID: <id> (...)" response
pub fn extract_id_from_response(response: &str) -> String {
    let start = response.find("ID: ").expect("response has no ID") + 4;
    response[start..]
        .split(|c: char| c.is_whitespace() || c == ')')
        .next()
        .unwrap_or("")
        .to_string()
}

/// A due date `days` from now
pub fn due_in_days(days: i64) -> NaiveDateTime {
    local_now() + Duration::days(days)
}

pub fn create_category(planner: &Planner, name: &str) -> Category {
    planner
        .create_category(NewCategory {
            name: name.to_string(),
            color: "#2196F3".to_string(),
            icon: "folder-outline".to_string(),
        })
        .unwrap()
}

pub fn create_project(planner: &Planner, category_id: &str, name: &str) -> Project {
    planner
        .create_project(NewProject {
            name: name.to_string(),
            description: String::new(),
            category_id: category_id.to_string(),
        })
        .unwrap()
}

pub fn create_task(planner: &Planner, project_id: &str, title: &str, due: NaiveDateTime) -> Task {
    planner
        .create_task(NewTask {
            title: title.to_string(),
            description: String::new(),
            due_date: due,
            project_id: project_id.to_string(),
            completed: false,
            image_url: None,
            priority: Priority::Medium,
        })
        .unwrap()
}

/// Create a category and project through the tool handlers, returning the project id
pub async fn add_project_via_handler(handler: &TaskboardHandler) -> (String, String) {
    let response = handler
        .handle_add_category("Work".to_string(), None, None)
        .await
        .unwrap();
    let category_id = extract_id_from_response(&response);
    let response = handler
        .handle_add_project("Launch".to_string(), category_id.clone(), None)
        .await
        .unwrap();
    (category_id, extract_id_from_response(&response))
}
