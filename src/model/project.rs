use super::dates::{deserialize_lenient, local_now};
use super::{PROJECT_ID_PREFIX, generate_id};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A project groups tasks and belongs to exactly one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category_id: String,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub created_at: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub category_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<String>,
}

impl Project {
    pub fn create(new: NewProject) -> Self {
        let now = local_now();
        Self {
            id: generate_id(PROJECT_ID_PREFIX),
            name: new.name,
            description: new.description,
            category_id: new.category_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a patch and refresh `updated_at`
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        self.updated_at = local_now();
    }
}
