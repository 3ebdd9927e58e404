use super::{delete_by_id, find, load_all, load_initial, save_all};
use crate::error::StorageError;
use crate::model::{Category, CategoryPatch, NewCategory};
use crate::storage::Storage;
use std::sync::Arc;

pub struct CategoryRepository {
    storage: Arc<Storage>,
}

impl CategoryRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn all(&self) -> Result<Vec<Category>, StorageError> {
        load_all(&self.storage)
    }

    pub fn get(&self, id: &str) -> Result<Option<Category>, StorageError> {
        find(&self.storage, id)
    }

    pub fn create(&self, new: NewCategory) -> Result<Category, StorageError> {
        let mut categories = self.all()?;
        let category = Category::create(new);
        categories.push(category.clone());
        save_all(&self.storage, &categories)?;
        Ok(category)
    }

    /// Returns the updated category, or `None` if `id` is unknown
    pub fn update(&self, id: &str, patch: CategoryPatch) -> Result<Option<Category>, StorageError> {
        let mut categories = self.all()?;
        let Some(category) = categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        category.apply(patch);
        let updated = category.clone();
        save_all(&self.storage, &categories)?;
        Ok(Some(updated))
    }

    pub fn delete(&self, id: &str) -> Result<bool, StorageError> {
        delete_by_id::<Category>(&self.storage, id)
    }

    pub fn load_initial(&self, initial: Vec<Category>) -> Result<bool, StorageError> {
        load_initial(&self.storage, initial)
    }
}
