//! Error types shared by the storage, repository and planner layers.

use std::path::PathBuf;

/// Failures of the key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse store file: {0}")]
    Parse(#[source] toml::de::Error),
    #[error("could not serialize value for key '{key}': {source}")]
    Serialize {
        key: String,
        source: toml::ser::Error,
    },
    #[error("stored value for key '{key}' has an unexpected shape: {source}")]
    Convert {
        key: String,
        source: toml::de::Error,
    },
    #[error("could not render store file: {0}")]
    Render(#[source] toml::ser::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

/// Domain-level errors returned by the planner.
#[derive(Debug, thiserror::Error)]
pub enum TaskboardError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl TaskboardError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

pub type Result<T, E = TaskboardError> = std::result::Result<T, E>;
