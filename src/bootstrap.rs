//! Initial-data bootstrap file
//!
//! A JSON document with optional `categories`, `projects` and `tasks`
//! arrays, in the same camelCase shape the store uses.

use crate::model::{Category, Project, Task};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InitialData {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl InitialData {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid initial data JSON")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read initial data from {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to load initial data from {}", path.display()))
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.projects.is_empty() && self.tasks.is_empty()
    }
}
