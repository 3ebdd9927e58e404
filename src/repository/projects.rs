use super::{delete_by_id, find, load_all, load_initial, save_all};
use crate::error::StorageError;
use crate::model::{NewProject, Project, ProjectPatch};
use crate::storage::Storage;
use std::sync::Arc;

pub struct ProjectRepository {
    storage: Arc<Storage>,
}

impl ProjectRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn all(&self) -> Result<Vec<Project>, StorageError> {
        load_all(&self.storage)
    }

    pub fn get(&self, id: &str) -> Result<Option<Project>, StorageError> {
        find(&self.storage, id)
    }

    pub fn by_category(&self, category_id: &str) -> Result<Vec<Project>, StorageError> {
        let mut projects = self.all()?;
        projects.retain(|p| p.category_id == category_id);
        Ok(projects)
    }

    pub fn create(&self, new: NewProject) -> Result<Project, StorageError> {
        let mut projects = self.all()?;
        let project = Project::create(new);
        projects.push(project.clone());
        save_all(&self.storage, &projects)?;
        Ok(project)
    }

    pub fn update(&self, id: &str, patch: ProjectPatch) -> Result<Option<Project>, StorageError> {
        let mut projects = self.all()?;
        let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        project.apply(patch);
        let updated = project.clone();
        save_all(&self.storage, &projects)?;
        Ok(Some(updated))
    }

    pub fn delete(&self, id: &str) -> Result<bool, StorageError> {
        delete_by_id::<Project>(&self.storage, id)
    }

    /// Delete every project of a category and return how many were removed
    pub fn delete_by_category(&self, category_id: &str) -> Result<usize, StorageError> {
        let mut projects = self.all()?;
        let before = projects.len();
        projects.retain(|p| p.category_id != category_id);
        let deleted = before - projects.len();
        if deleted > 0 {
            save_all(&self.storage, &projects)?;
        }
        Ok(deleted)
    }

    pub fn load_initial(&self, initial: Vec<Project>) -> Result<bool, StorageError> {
        load_initial(&self.storage, initial)
    }
}
