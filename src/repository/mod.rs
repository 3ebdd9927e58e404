//! Collection repositories over the key-value store
//!
//! Each repository owns one key of the store and follows the same pattern:
//! read the whole collection, mutate it in memory, write it back.
//! - `categories`: `CategoryRepository`
//! - `projects`: `ProjectRepository`
//! - `tasks`: `TaskRepository`

mod categories;
mod projects;
mod tasks;

pub use categories::CategoryRepository;
pub use projects::ProjectRepository;
pub use tasks::TaskRepository;

use crate::error::StorageError;
use crate::model::{Category, Project, Task};
use crate::storage::{CATEGORIES_KEY, PROJECTS_KEY, Storage, TASKS_KEY};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record stored as one element of a keyed collection
pub(crate) trait Entity: Serialize + DeserializeOwned + Clone {
    const KEY: &'static str;

    fn id(&self) -> &str;
}

impl Entity for Category {
    const KEY: &'static str = CATEGORIES_KEY;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Project {
    const KEY: &'static str = PROJECTS_KEY;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Task {
    const KEY: &'static str = TASKS_KEY;

    fn id(&self) -> &str {
        &self.id
    }
}

pub(crate) fn load_all<T: Entity>(storage: &Storage) -> Result<Vec<T>, StorageError> {
    Ok(storage.get::<Vec<T>>(T::KEY)?.unwrap_or_default())
}

pub(crate) fn save_all<T: Entity>(storage: &Storage, items: &[T]) -> Result<(), StorageError> {
    storage.set(T::KEY, items)
}

pub(crate) fn find<T: Entity>(storage: &Storage, id: &str) -> Result<Option<T>, StorageError> {
    Ok(load_all::<T>(storage)?.into_iter().find(|item| item.id() == id))
}

/// Remove the record with `id`. Returns false when nothing matched.
pub(crate) fn delete_by_id<T: Entity>(storage: &Storage, id: &str) -> Result<bool, StorageError> {
    let mut items = load_all::<T>(storage)?;
    let before = items.len();
    items.retain(|item| item.id() != id);
    if items.len() == before {
        return Ok(false);
    }
    save_all(storage, &items)?;
    Ok(true)
}

/// Seed the collection only when it is currently empty.
///
/// Returns true when the data was written.
pub(crate) fn load_initial<T: Entity>(storage: &Storage, initial: Vec<T>) -> Result<bool, StorageError> {
    if initial.is_empty() || !load_all::<T>(storage)?.is_empty() {
        return Ok(false);
    }
    save_all(storage, &initial)?;
    Ok(true)
}
