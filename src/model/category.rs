use super::dates::{deserialize_lenient, local_now};
use super::{CATEGORY_ID_PREFIX, generate_id};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Top-level grouping of projects (e.g. "Work", "School", "Personal")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Display color, usually a hex string such as `#3880ff`
    pub color: String,
    /// Icon name understood by the client
    pub icon: String,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub created_at: NaiveDateTime,
}

/// Fields supplied by the caller when creating a category
#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub icon: String,
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl Category {
    pub fn create(new: NewCategory) -> Self {
        Self {
            id: generate_id(CATEGORY_ID_PREFIX),
            name: new.name,
            color: new.color,
            icon: new.icon,
            created_at: local_now(),
        }
    }

    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
    }
}
